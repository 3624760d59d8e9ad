use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::{extract::Form, form, AppState, Error, SearchResponse};
use crate::booking::{
    self, mutation,
    query::{self, ShowListing},
    Notice,
};
use entity::Show;

pub async fn shows(
    State(AppState(db, format)): State<AppState>,
) -> Result<Json<Vec<ShowListing>>, Error> {
    Ok(Json(query::list_all_shows(&db, format).await?))
}

pub async fn search(
    State(AppState(db, format)): State<AppState>,
    Form(form): Form,
) -> Result<Json<SearchResponse<ShowListing>>, Error> {
    let search_term = form.get("search_term").unwrap_or_default().to_string();
    let found = query::search_shows(&db, &search_term, format).await?;
    Ok(Json(SearchResponse {
        count: found.count,
        data: found.data,
        search_term,
    }))
}

#[derive(Serialize)]
pub struct Created {
    pub show: Option<Show>,
    pub notice: Notice,
    pub shows: Vec<ShowListing>,
}

/// The show listing sent along with a booking. The booking has been decided
/// by then, so a failed read only costs the listing.
fn listing_or_empty(listing: Result<Vec<ShowListing>, booking::Error>) -> Vec<ShowListing> {
    listing.unwrap_or_else(|e| {
        tracing::warn! {error = %e, "Could not list shows after booking"};
        Vec::new()
    })
}

/// Books a show. A reference to a missing artist or venue is answered with
/// 422 and the unchanged listing.
pub async fn create(
    State(AppState(db, format)): State<AppState>,
    Form(form): Form,
) -> Result<Response, Error> {
    let form::ShowForm {
        artist_id,
        venue_id,
        start_time,
    } = form::show_form(&form)?;
    let outcome = mutation::create_show(&db, artist_id, venue_id, start_time).await;
    let (status, show) = match outcome.result {
        Ok(show) => (StatusCode::CREATED, Some(show)),
        Err(booking::Error::IntegrityViolation { .. }) => {
            (StatusCode::UNPROCESSABLE_ENTITY, None)
        }
        Err(e) => return Err(e.into()),
    };
    let shows = listing_or_empty(query::list_all_shows(&db, format).await);
    Ok((
        status,
        Json(Created {
            show,
            notice: outcome.notice,
            shows,
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn failed_listing_is_empty() {
        let failed = Err(booking::Error::Storage(DbErr::Custom("gone".to_string())));
        assert!(listing_or_empty(failed).is_empty());

        let listing = ShowListing {
            show_id: 1,
            venue_id: 1,
            venue_name: "Blue Note".to_string(),
            artist_id: 1,
            artist_name: "Sax Trio".to_string(),
            artist_image_link: None,
            start_time: datetime!(2026-10-24 21:00),
            formatted_start_time: "Sat 10, 24, 2026 9:00PM".to_string(),
        };
        assert_eq!(listing_or_empty(Ok(vec![listing.clone()])), [listing]);
    }
}
