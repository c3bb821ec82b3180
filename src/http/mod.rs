//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID set/propagated)
//!     → observability::tracing (segment span, trace header)
//!     → handlers.rs (health, forced error, video title)
//!     → response.rs (lookup errors → 404 / 500)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::LookupError;
pub use server::{AppState, HttpServer};
