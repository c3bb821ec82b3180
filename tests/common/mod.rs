//! Shared utilities for integration testing: a stand-in for the YouTube
//! Data API and a helper that boots the proxy against it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

use youtube_title_proxy::config::{ApiKey, ServiceConfig};
use youtube_title_proxy::{HttpServer, Shutdown};

pub const API_KEY: &str = "test-api-key";

/// Programmable fake of `GET /youtube/v3/videos`.
#[derive(Clone, Default)]
pub struct MockYouTube {
    titles: Arc<HashMap<String, String>>,
    delay: Duration,
    pub hits: Arc<AtomicU32>,
    pub last_query: Arc<Mutex<HashMap<String, String>>>,
    pub last_trace: Arc<Mutex<Option<String>>>,
}

impl MockYouTube {
    pub fn with_videos(videos: &[(&str, &str)]) -> Self {
        Self {
            titles: Arc::new(
                videos
                    .iter()
                    .map(|(id, title)| (id.to_string(), title.to_string()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn hit_count(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn list_videos(
    State(mock): State<MockYouTube>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    *mock.last_query.lock().unwrap() = query.clone();
    *mock.last_trace.lock().unwrap() = headers
        .get("x-amzn-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if !mock.delay.is_zero() {
        tokio::time::sleep(mock.delay).await;
    }

    if query.get("key").map(String::as_str) != Some(API_KEY) {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "errors": [{"reason": "badRequest"}]
            }
        });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    let id = query.get("id").cloned().unwrap_or_default();
    let items: Vec<_> = mock
        .titles
        .get(&id)
        .map(|title| {
            json!({
                "kind": "youtube#video",
                "id": id,
                "snippet": {"title": title, "channelTitle": "Mock Channel"}
            })
        })
        .into_iter()
        .collect();

    Json(json!({
        "kind": "youtube#videoListResponse",
        "items": items,
        "pageInfo": {"totalResults": items.len(), "resultsPerPage": 5}
    }))
    .into_response()
}

/// Serve the mock on an ephemeral port; returns its base URL.
pub async fn start_mock_youtube(mock: MockYouTube) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/youtube/v3/videos", get(list_videos))
        .with_state(mock);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{}/youtube/v3", addr)
}

/// Config pointing the proxy at `base_url` with a valid key.
pub fn proxy_config(base_url: &str) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.youtube.api_key = ApiKey::new(API_KEY);
    config.youtube.base_url = base_url.to_string();
    config
}

/// Boot the proxy on an ephemeral port.
pub async fn start_proxy(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let server = HttpServer::from_config(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
