#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use cick_playlister::spotify::auth::basic_authorization;

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";

pub async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

pub fn serve_on(listener: TcpListener, router: Router) {
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let (listener, base) = bind().await;
    serve_on(listener, router);
    base
}

/// A date a few days ago, new under any reasonable threshold.
pub fn recent_date() -> String {
    (Utc::now() - Duration::days(3))
        .format("%Y-%m-%d")
        .to_string()
}

/// In-process stand-in for the Spotify accounts and Web API endpoints.
#[derive(Clone)]
pub struct FakeSpotify {
    pub base: String,
    pub token_requests: Arc<AtomicUsize>,
    pub api_requests: Arc<AtomicUsize>,
    pub expires_in: i64,
}

impl FakeSpotify {
    pub async fn start() -> Self {
        Self::start_with_expiry(3600).await
    }

    pub async fn start_with_expiry(expires_in: i64) -> Self {
        let (listener, base) = bind().await;
        let fake = FakeSpotify {
            base,
            token_requests: Arc::new(AtomicUsize::new(0)),
            api_requests: Arc::new(AtomicUsize::new(0)),
            expires_in,
        };

        let router = Router::new()
            .route("/api/token", post(token))
            .route("/broken/token", post(|| async { "this is not json" }))
            .route("/v1/tracks/{id}", get(track))
            .route("/v1/albums/{id}", get(album))
            .route("/v1/albums/{id}/tracks", get(album_tracks))
            .route("/v1/playlists/{id}/tracks", get(playlist_tracks))
            .with_state(fake.clone());
        serve_on(listener, router);

        fake
    }

    pub fn api_url(&self) -> String {
        format!("{}/v1", self.base)
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.base)
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    pub fn api_requests(&self) -> usize {
        self.api_requests.load(Ordering::SeqCst)
    }
}

async fn token(
    State(fake): State<FakeSpotify>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let count = fake.token_requests.fetch_add(1, Ordering::SeqCst) + 1;

    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == basic_authorization(CLIENT_ID, CLIENT_SECRET));
    let client_credentials = form.get("grant_type").map(String::as_str) == Some("client_credentials");

    if !authorized || !client_credentials {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_client" })),
        )
            .into_response();
    }

    Json(json!({
        "access_token": format!("token-{}", count),
        "token_type": "Bearer",
        "expires_in": fake.expires_in,
    }))
    .into_response()
}

/// Rejects calls without a bearer token or without the `fields` filter.
fn check_request(
    fake: &FakeSpotify,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
    requires_fields: bool,
) -> Option<Response> {
    fake.api_requests.fetch_add(1, Ordering::SeqCst);

    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer token-"));
    if !bearer {
        return Some(StatusCode::UNAUTHORIZED.into_response());
    }
    if requires_fields && !params.contains_key("fields") {
        return Some(StatusCode::BAD_REQUEST.into_response());
    }
    None
}

fn status_for(id: &str) -> Option<Response> {
    match id {
        "bad" => Some((StatusCode::BAD_REQUEST, "invalid id").into_response()),
        "missing" => Some((StatusCode::NOT_FOUND, "not found").into_response()),
        "boom" => Some((StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()),
        "garbled" => Some((StatusCode::OK, "{ \"name\": ").into_response()),
        _ => None,
    }
}

fn artists(names: &[&str]) -> Value {
    Value::Array(names.iter().map(|n| json!({ "name": n })).collect())
}

async fn track(
    State(fake): State<FakeSpotify>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejected) = check_request(&fake, &headers, &params, true) {
        return rejected;
    }
    if let Some(status) = status_for(&id) {
        return status;
    }

    Json(json!({
        "artists": artists(&["Robyn", "Kleerup"]),
        "name": format!("Track {}", id),
        "album": {
            "name": "With Every Heartbeat",
            "album_type": "single",
            "release_date": recent_date(),
            "release_date_precision": "day"
        }
    }))
    .into_response()
}

async fn album(
    State(fake): State<FakeSpotify>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejected) = check_request(&fake, &headers, &params, true) {
        return rejected;
    }
    if let Some(status) = status_for(&id) {
        return status;
    }

    // "partial" links to a track page that does not exist
    let offset = if id == "partial" { 9 } else { 2 };
    Json(json!({
        "name": "Heaven or Las Vegas",
        "album_type": "album",
        "release_date": "1990",
        "release_date_precision": "year",
        "tracks": {
            "next": format!("{}/v1/albums/{}/tracks?offset={}", fake.base, id, offset),
            "items": [
                { "artists": artists(&["Cocteau Twins"]), "name": "Cherry-coloured Funk" },
                { "artists": artists(&["Cocteau Twins"]), "name": "Pitch the Baby" }
            ]
        }
    }))
    .into_response()
}

async fn album_tracks(
    State(fake): State<FakeSpotify>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejected) = check_request(&fake, &headers, &params, false) {
        return rejected;
    }

    match params.get("offset").map(String::as_str) {
        Some("2") => Json(json!({
            "next": format!("{}/v1/albums/{}/tracks?offset=3", fake.base, id),
            "items": [{ "artists": artists(&["Cocteau Twins"]), "name": "Iceblink Luck" }]
        }))
        .into_response(),
        Some("3") => Json(json!({
            "next": null,
            "items": [{ "artists": artists(&["Cocteau Twins"]), "name": "Fifty-fifty Clown" }]
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn playlist_tracks(
    State(fake): State<FakeSpotify>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejected) = check_request(&fake, &headers, &params, false) {
        return rejected;
    }
    if let Some(status) = status_for(&id) {
        return status;
    }
    if id == "local" {
        return local_playlist();
    }

    match params.get("offset").map(String::as_str) {
        None => Json(json!({
            "next": format!("{}/v1/playlists/{}/tracks?offset=2", fake.base, id),
            "items": [
                { "track": {
                    "artists": artists(&["Caribou"]),
                    "name": "Honey",
                    "album": {
                        "name": "Honey",
                        "album_type": "single",
                        "release_date": recent_date(),
                        "release_date_precision": "day"
                    }
                }},
                { "track": null }
            ]
        }))
        .into_response(),
        Some("2") => Json(json!({
            "next": "",
            "items": [
                { "track": {
                    "artists": artists(&["Massive Attack", "Elizabeth Fraser"]),
                    "name": "Teardrop",
                    "album": {
                        "name": "Mezzanine",
                        "album_type": "album",
                        "release_date": "1998-04",
                        "release_date_precision": "month"
                    }
                }}
            ]
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A single page mixing a catalog track, a local file and a podcast episode.
fn local_playlist() -> Response {
    Json(json!({
        "next": null,
        "items": [
            { "track": {
                "artists": artists(&["Broadcast"]),
                "name": "Tears in the Typing Pool",
                "album": {
                    "name": "Tender Buttons",
                    "album_type": "album",
                    "release_date": "2005-09-26",
                    "release_date_precision": "day"
                }
            }},
            { "track": {
                "artists": artists(&["Home Recording"]),
                "name": "demo.mp3",
                "album": {
                    "name": "Local Files",
                    "album_type": null,
                    "release_date": null,
                    "release_date_precision": null
                }
            }},
            { "track": {
                "name": "Episode 12",
                "album": { "name": null }
            }}
        ]
    }))
    .into_response()
}
