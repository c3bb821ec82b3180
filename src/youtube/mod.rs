//! Upstream video metadata subsystem.
//!
//! # Data Flow
//! ```text
//! handler (video id, trace header)
//!     → client.rs (videos.list?part=snippet&id=..&key=..)
//!     → models.rs (decode items / Google error envelope)
//!     → error.rs (timeout, transport, api, decode)
//! ```
//!
//! # Security Constraints
//! - The API key is never logged; `ApiKey` redacts itself and transport
//!   errors are stripped of the request URL

pub mod client;
pub mod error;
pub mod models;

pub use client::{VideoLookup, YouTubeClient, SNIPPET_PART};
pub use error::{YouTubeError, YouTubeResult};
pub use models::{Snippet, VideoItem, VideoListResponse};
