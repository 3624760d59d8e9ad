use axum::{extract::State, response::Response, Json};

use super::{
    extract::{Form, Path},
    form, see_other, AppState, Error, SearchResponse,
};
use crate::booking::{
    self, mutation,
    query::{self, Area, Detail, Summary},
    resolver::Side,
    store,
};
use entity::Venue;

pub async fn venues(State(AppState(db, _)): State<AppState>) -> Result<Json<Vec<Area>>, Error> {
    let venues = query::list_venues_by_city(&db).await?;
    let upcoming = query::upcoming_show_counts(&db, Side::Venue, booking::now()).await?;
    Ok(Json(query::areas(venues, &upcoming)))
}

pub async fn search(
    State(AppState(db, _)): State<AppState>,
    Form(form): Form,
) -> Result<Json<SearchResponse<Summary>>, Error> {
    let search_term = form.get("search_term").unwrap_or_default().to_string();
    let found = query::search_by_name::<Venue, _>(&db, &search_term).await?;
    let upcoming = query::upcoming_show_counts(&db, Side::Venue, booking::now()).await?;
    Ok(Json(SearchResponse {
        count: found.count,
        data: query::summaries(found.data, &upcoming),
        search_term,
    }))
}

pub async fn venue(
    State(AppState(db, format)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Detail<Venue>>, Error> {
    Ok(Json(
        query::venue_detail(&db, id, booking::now(), format).await?,
    ))
}

pub async fn create(
    State(AppState(db, _)): State<AppState>,
    Form(form): Form,
) -> Result<Response, Error> {
    let fields = form::venue_fields(&form)?;
    let outcome = mutation::create_venue(&db, fields).await;
    Ok(match outcome.result {
        Ok(id) => see_other(format!("/venues/{}", id), outcome.notice),
        Err(_) => see_other("/".to_string(), outcome.notice),
    })
}

/// The stored venue, for pre-filling the edit form.
pub async fn edit(
    State(AppState(db, _)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Venue>, Error> {
    Ok(Json(store::get::<Venue, _>(&db, id).await?))
}

pub async fn update(
    State(AppState(db, _)): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form,
) -> Result<Response, Error> {
    let fields = form::venue_fields(&form)?;
    let outcome = mutation::update_venue(&db, id, fields).await;
    match outcome.result {
        Ok(venue) => Ok(see_other(format!("/venues/{}", venue.id), outcome.notice)),
        Err(e) if e.is_not_found() => Err(e.into()),
        Err(_) => Ok(see_other("/".to_string(), outcome.notice)),
    }
}

pub async fn delete(
    State(AppState(db, _)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, Error> {
    let outcome = mutation::delete_venue(&db, id).await;
    match outcome.result {
        Err(e) if e.is_not_found() => Err(e.into()),
        _ => Ok(see_other("/".to_string(), outcome.notice)),
    }
}
