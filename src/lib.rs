//! YouTube title proxy library.
//!
//! Three routes behind a traced axum stack: a health check, a forced error
//! and a video title lookup relayed from the YouTube Data API.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod youtube;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use youtube::{VideoLookup, YouTubeClient};
