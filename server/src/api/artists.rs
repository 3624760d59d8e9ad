use axum::{extract::State, response::Response, Json};

use super::{
    extract::{Form, Path},
    form, see_other, AppState, Error, SearchResponse,
};
use crate::booking::{
    self, mutation,
    query::{self, Detail, Summary},
    resolver::Side,
    store,
};
use entity::Artist;

pub async fn artists(State(AppState(db, _)): State<AppState>) -> Result<Json<Vec<Artist>>, Error> {
    Ok(Json(query::list_artists(&db).await?))
}

pub async fn search(
    State(AppState(db, _)): State<AppState>,
    Form(form): Form,
) -> Result<Json<SearchResponse<Summary>>, Error> {
    let search_term = form.get("search_term").unwrap_or_default().to_string();
    let found = query::search_by_name::<Artist, _>(&db, &search_term).await?;
    let upcoming = query::upcoming_show_counts(&db, Side::Artist, booking::now()).await?;
    Ok(Json(SearchResponse {
        count: found.count,
        data: query::summaries(found.data, &upcoming),
        search_term,
    }))
}

pub async fn artist(
    State(AppState(db, format)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Detail<Artist>>, Error> {
    Ok(Json(
        query::artist_detail(&db, id, booking::now(), format).await?,
    ))
}

pub async fn create(
    State(AppState(db, _)): State<AppState>,
    Form(form): Form,
) -> Result<Response, Error> {
    let fields = form::artist_fields(&form)?;
    let outcome = mutation::create_artist(&db, fields).await;
    Ok(match outcome.result {
        Ok(id) => see_other(format!("/artists/{}", id), outcome.notice),
        Err(_) => see_other("/".to_string(), outcome.notice),
    })
}

pub async fn edit(
    State(AppState(db, _)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Artist>, Error> {
    Ok(Json(store::get::<Artist, _>(&db, id).await?))
}

pub async fn update(
    State(AppState(db, _)): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form,
) -> Result<Response, Error> {
    let fields = form::artist_fields(&form)?;
    let outcome = mutation::update_artist(&db, id, fields).await;
    match outcome.result {
        Ok(artist) => Ok(see_other(format!("/artists/{}", artist.id), outcome.notice)),
        Err(e) if e.is_not_found() => Err(e.into()),
        Err(_) => Ok(see_other("/".to_string(), outcome.notice)),
    }
}

pub async fn delete(
    State(AppState(db, _)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, Error> {
    let outcome = mutation::delete_artist(&db, id).await;
    match outcome.result {
        Err(e) if e.is_not_found() => Err(e.into()),
        _ => Ok(see_other("/".to_string(), outcome.notice)),
    }
}
