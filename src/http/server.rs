//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, trace segment, tracing, timeout)
//! - Inject the video lookup into handlers through `AppState`
//! - Serve on a listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::tracing::{trace_segment, SegmentContext};
use crate::youtube::{VideoLookup, YouTubeClient, YouTubeResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub videos: Arc<dyn VideoLookup>,
}

/// HTTP server for the title lookup service.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server around an existing video lookup.
    pub fn new(config: ServiceConfig, videos: Arc<dyn VideoLookup>) -> Self {
        let state = AppState { videos };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Create a server talking to the YouTube Data API described by `config`.
    pub fn from_config(config: ServiceConfig) -> YouTubeResult<Self> {
        let client = YouTubeClient::new(&config.youtube)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let segments = SegmentContext::from_config(&config.tracing);

        Router::new()
            .route("/", get(handlers::health))
            .route("/500", get(handlers::internal_error))
            .route("/youtube-video/{video_id}", get(handlers::video_title))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(propagate_request_id_layer())
                    .layer(middleware::from_fn_with_state(segments, trace_segment))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
