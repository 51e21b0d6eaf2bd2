#![allow(dead_code, missing_docs, clippy::expect_used)]

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::header::{ACCEPT, CONTENT_TYPE, REFERER};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rstest::fixture;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;
use url::Url;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

/// A local stand-in for the NBA APIs, listening on a random port.
#[derive(Debug)]
pub struct FakeNbaApi {
    pub base_uri: Url,
    handle: JoinHandle<()>,
}

impl FakeNbaApi {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        let base_uri = format!("http://{address}/").parse()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, router()).await.expect("server running");
        });
        info!(%base_uri, "fake API started");

        Ok(Self { base_uri, handle })
    }
}

impl Drop for FakeNbaApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[fixture]
pub async fn api() -> FakeNbaApi {
    init_tracing();
    match FakeNbaApi::start().await {
        Ok(api) => api,
        Err(error) => {
            panic!("fail to start the fake API: {error:?}");
        }
    }
}

fn router() -> Router {
    Router::new()
        .route("/data/prod/v1/{year}/players/{file}", get(player_profile))
        .route("/stats/scoreboardv2", get(scoreboard))
        .route("/js/data/playtype/player_Misc.js", get(play_type))
        .route("/broken.json", get(broken))
}

fn header(headers: &HeaderMap, name: impl axum::http::header::AsHeaderName) -> Value {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map_or(Value::Null, |value| Value::String(value.to_string()))
}

async fn player_profile(
    Path((year, file)): Path<(String, String)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(player_id) = file.strip_suffix("_profile.json") else {
        return (StatusCode::NOT_FOUND, "unknown file").into_response();
    };

    Json(json!({
        "league": {
            "standard": {
                "year": year,
                "playerId": player_id,
                "accept": header(&headers, ACCEPT),
            }
        }
    }))
    .into_response()
}

async fn scoreboard(
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if header(&headers, REFERER) != json!("http://stats.nba.com/scores/") {
        return (StatusCode::FORBIDDEN, "Access denied").into_response();
    }

    Json(json!({
        "resource": "scoreboard",
        "parameters": query,
    }))
    .into_response()
}

async fn play_type(headers: HeaderMap) -> impl IntoResponse {
    let body = format!(
        "var accept = {}; var playtype = {{\"rowSet\": [[201939, \"Stephen Curry\", 1.12]]}};",
        header(&headers, ACCEPT)
    );
    ([(CONTENT_TYPE, "application/javascript")], body)
}

async fn broken() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/json")], "{\"league\": ")
}
