use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use time::{macros::format_description, Duration};
use tower::ServiceExt;

use base::setting::{Database, TimeFormat};
use server::{
    api::{router, AppState},
    booking,
};

async fn app() -> Router {
    let pool = Database {
        max_connections: 1,
        min_connections: 1,
        idle_timeout: None,
        max_lifetime: None,
        sqlx_logging: false,
        ..Default::default()
    };
    let db = base::database::connect("sqlite::memory:", &pool)
        .await
        .unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    router(AppState(db, TimeFormat::Medium))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    form: Option<&str>,
) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match form {
        Some(form) => request
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn location(headers: &HeaderMap) -> &str {
    headers.get(header::LOCATION).unwrap().to_str().unwrap()
}

/// A start time `days` away from now, as a show form would submit it.
fn start_time(days: i64) -> String {
    let at = booking::now() + Duration::days(days);
    at.format(format_description!(
        "[year]-[month]-[day]+[hour]%3A[minute]%3A[second]"
    ))
    .unwrap()
}

const BLUE_NOTE: &str = "name=Blue+Note&city=New+York&state=NY&address=131+W+3rd+St\
    &phone=212-475-8592&genres=Jazz&genres=Blues&seeking_talent=y";
const SAX_TRIO: &str = "name=Sax+Trio&city=New+Orleans&state=LA&phone=504-555-0199\
    &genres=Jazz&image_link=https%3A%2F%2Fexample.com%2Fsax.png";

#[tokio::test]
async fn create_and_read_venue() {
    let app = app().await;
    let (status, headers, body) =
        send(&app, Method::POST, "/venues/create", Some(BLUE_NOTE)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/venues/1");
    assert_eq!(body["notice"]["level"], "success");
    assert_eq!(
        body["notice"]["message"],
        "Venue Blue Note was successfully listed!"
    );

    let (status, _, venue) = send(&app, Method::GET, "/venues/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(venue["name"], "Blue Note");
    assert_eq!(venue["genres"], serde_json::json!(["Jazz", "Blues"]));
    assert_eq!(venue["seeking_talent"], true);
    assert_eq!(venue["website"], Value::Null);
    assert!(venue.get("name_search").is_none());
    assert_eq!(venue["past_shows_count"], 0);
    assert_eq!(venue["upcoming_shows_count"], 0);

    let (status, _, edit) = send(&app, Method::GET, "/venues/1/edit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edit["address"], "131 W 3rd St");
}

#[tokio::test]
async fn shows_split_into_past_and_upcoming() {
    let app = app().await;
    send(&app, Method::POST, "/venues/create", Some(BLUE_NOTE)).await;
    send(&app, Method::POST, "/artists/create", Some(SAX_TRIO)).await;

    let upcoming = format!("artist_id=1&venue_id=1&start_time={}", start_time(1));
    let (status, _, created) = send(&app, Method::POST, "/shows/create", Some(&upcoming)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["notice"]["message"], "Show was successfully listed!");
    assert_eq!(created["show"]["artist_id"], 1);
    assert_eq!(created["shows"].as_array().unwrap().len(), 1);

    let past = format!("artist_id=1&venue_id=1&start_time={}", start_time(-1));
    send(&app, Method::POST, "/shows/create", Some(&past)).await;

    let (_, _, venue) = send(&app, Method::GET, "/venues/1", None).await;
    assert_eq!(venue["upcoming_shows_count"], 1);
    assert_eq!(venue["past_shows_count"], 1);
    let entry = &venue["upcoming_shows"][0];
    assert_eq!(entry["counterpart"]["kind"], "artist");
    assert_eq!(entry["counterpart"]["id"], 1);
    assert_eq!(entry["counterpart"]["name"], "Sax Trio");
    assert_eq!(
        entry["counterpart"]["image_link"],
        "https://example.com/sax.png"
    );

    let (_, _, artist) = send(&app, Method::GET, "/artists/1", None).await;
    assert_eq!(artist["past_shows"][0]["counterpart"]["name"], "Blue Note");

    let (_, _, areas) = send(&app, Method::GET, "/venues", None).await;
    assert_eq!(areas[0]["city"], "New York");
    assert_eq!(areas[0]["venues"][0]["num_upcoming_shows"], 1);

    let (_, _, shows) = send(&app, Method::GET, "/shows", None).await;
    let shows = shows.as_array().unwrap();
    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0]["show_id"], 2);
    assert_eq!(shows[0]["artist_name"], "Sax Trio");
    assert_eq!(shows[0]["venue_name"], "Blue Note");
}

#[tokio::test]
async fn dangling_show_is_rejected() {
    let app = app().await;
    send(&app, Method::POST, "/venues/create", Some(BLUE_NOTE)).await;
    let form = format!("artist_id=5&venue_id=1&start_time={}", start_time(1));
    let (status, _, body) = send(&app, Method::POST, "/shows/create", Some(&form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["show"], Value::Null);
    assert_eq!(body["notice"]["level"], "failure");
    assert_eq!(
        body["notice"]["message"],
        "An error occurred. Show could not be listed."
    );

    let (_, _, shows) = send(&app, Method::GET, "/shows", None).await;
    assert!(shows.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_venue_removes_its_shows() {
    let app = app().await;
    send(&app, Method::POST, "/venues/create", Some(BLUE_NOTE)).await;
    send(&app, Method::POST, "/artists/create", Some(SAX_TRIO)).await;
    let form = format!("artist_id=1&venue_id=1&start_time={}", start_time(3));
    send(&app, Method::POST, "/shows/create", Some(&form)).await;

    let (status, headers, body) = send(&app, Method::DELETE, "/venues/1", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");
    assert_eq!(body["notice"]["message"], "Venue was successfully deleted!");

    let (_, _, shows) = send(&app, Method::GET, "/shows", None).await;
    assert!(shows.as_array().unwrap().is_empty());
    let (_, _, artist) = send(&app, Method::GET, "/artists/1", None).await;
    assert_eq!(artist["upcoming_shows_count"], 0);

    let (status, _, body) = send(&app, Method::GET, "/venues/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Not found");

    let (status, _, _) = send(&app, Method::DELETE, "/venues/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = app().await;
    send(&app, Method::POST, "/artists/create", Some(SAX_TRIO)).await;

    let form = "name=Sax+Quartet&city=Chicago&state=IL&phone=312-555-0101&genres=Funk";
    let (status, headers, body) =
        send(&app, Method::POST, "/artists/1/edit", Some(form)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/artists/1");
    assert_eq!(
        body["notice"]["message"],
        "Artist Sax Quartet was successfully updated!"
    );

    let (_, _, artist) = send(&app, Method::GET, "/artists/1/edit", None).await;
    assert_eq!(artist["name"], "Sax Quartet");
    assert_eq!(artist["genres"], serde_json::json!(["Funk"]));
    assert_eq!(artist["image_link"], Value::Null);

    let (status, _, _) = send(&app, Method::POST, "/artists/9/edit", Some(form)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_by_name() {
    let app = app().await;
    for name in ["The+Wild+Sax+Band", "Guns+N+Petals"] {
        let form = format!("name={}&city=San+Francisco&state=CA&phone=1", name);
        send(&app, Method::POST, "/artists/create", Some(&form)).await;
    }

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/artists/search",
        Some("search_term=band"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["search_term"], "band");
    assert_eq!(body["data"][0]["name"], "The Wild Sax Band");
    assert_eq!(body["data"][0]["num_upcoming_shows"], 0);

    let (_, _, body) = send(&app, Method::POST, "/artists/search", Some("")).await;
    assert_eq!(body["count"], 2);

    let (_, _, body) = send(
        &app,
        Method::POST,
        "/venues/search",
        Some("search_term=band"),
    )
    .await;
    assert_eq!(body["count"], 0);

    let form = "name=%C3%89CLAIR+%C3%96RCHESTRA&city=Paris&state=FR&phone=1";
    send(&app, Method::POST, "/artists/create", Some(form)).await;
    let (_, _, body) = send(
        &app,
        Method::POST,
        "/artists/search",
        Some("search_term=%C3%A9clair"),
    )
    .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "ÉCLAIR ÖRCHESTRA");

    let (_, _, body) = send(
        &app,
        Method::POST,
        "/artists/search",
        Some("search_term=%25"),
    )
    .await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn malformed_requests() {
    let app = app().await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/venues/create",
        Some("name=Blue+Note&city=New+York"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/venues/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (status, _, _) = send(&app, Method::GET, "/venues/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/shows/create",
        Some("artist_id=1&venue_id=1&start_time=soon"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn index_lists_recent_records() {
    let app = app().await;
    send(&app, Method::POST, "/venues/create", Some(BLUE_NOTE)).await;
    send(&app, Method::POST, "/artists/create", Some(SAX_TRIO)).await;
    let (status, _, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["venues"][0]["name"], "Blue Note");
    assert_eq!(body["artists"][0]["name"], "Sax Trio");
}
