pub mod artists;
pub mod error;
pub mod extract;
pub mod form;
pub mod shows;
pub mod venues;

use axum::{
    extract::State,
    http::{
        header::{ACCEPT, CONTENT_TYPE, LOCATION},
        StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
pub use error::Error;
use sea_orm::DbConn;
use serde::Serialize;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::booking::{store, Notice};
use base::setting::TimeFormat;
use entity::{Artist, Venue};

/// Shared handler state: the connection pool and how start times are shown.
#[derive(Clone)]
pub struct AppState(pub DbConn, pub TimeFormat);

const RECENT: u64 = 10;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(AllowOrigin::mirror_request())
        .allow_headers([ACCEPT, CONTENT_TYPE]);
    let tracing = TraceLayer::new_for_http();
    Router::new()
        .route("/", get(index))
        .route("/venues", get(venues::venues))
        .route("/venues/search", post(venues::search))
        .route("/venues/create", post(venues::create))
        .route("/venues/:id", get(venues::venue).delete(venues::delete))
        .route("/venues/:id/edit", get(venues::edit).post(venues::update))
        .route("/artists", get(artists::artists))
        .route("/artists/search", post(artists::search))
        .route("/artists/create", post(artists::create))
        .route("/artists/:id", get(artists::artist).delete(artists::delete))
        .route("/artists/:id/edit", get(artists::edit).post(artists::update))
        .route("/shows", get(shows::shows))
        .route("/shows/search", post(shows::search))
        .route("/shows/create", post(shows::create))
        .fallback(fallback)
        .layer(cors)
        .layer(tracing)
        .with_state(state)
}

#[derive(Serialize)]
struct Index {
    venues: Vec<Venue>,
    artists: Vec<Artist>,
}

async fn index(State(AppState(db, _)): State<AppState>) -> Result<Json<Index>, Error> {
    Ok(Json(Index {
        venues: store::recent::<Venue, _>(&db, RECENT).await?,
        artists: store::recent::<Artist, _>(&db, RECENT).await?,
    }))
}

async fn fallback() -> Error {
    Error::not_found()
}

#[derive(Serialize)]
pub struct NoticeBody {
    pub notice: Notice,
}

/// Redirects the client after a mutation, carrying the notice in the body.
pub fn see_other(location: String, notice: Notice) -> Response {
    (
        StatusCode::SEE_OTHER,
        [(LOCATION, location)],
        Json(NoticeBody { notice }),
    )
        .into_response()
}

#[derive(Serialize)]
pub struct SearchResponse<T> {
    pub count: usize,
    pub data: Vec<T>,
    pub search_term: String,
}
