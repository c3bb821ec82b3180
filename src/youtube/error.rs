//! Upstream lookup errors.

use thiserror::Error;

/// Errors that can occur while looking up a video.
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// The call did not complete within the configured deadline.
    #[error("YouTube API timeout after {0} ms")]
    Timeout(u64),

    /// Connection or protocol failure.
    #[error("YouTube API request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Failed to decode YouTube API response: {0}")]
    Decode(String),

    /// A matching video came back without the requested snippet.
    #[error("Video {0} has no snippet")]
    MissingSnippet(String),
}

/// Result type for lookups.
pub type YouTubeResult<T> = Result<T, YouTubeError>;
