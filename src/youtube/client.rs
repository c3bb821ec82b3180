//! YouTube Data API v3 client.
//!
//! # Responsibilities
//! - Call `videos.list` for a single id with `part=snippet`
//! - Enforce the outbound deadline
//! - Forward the trace context as a subsegment header
//! - Translate transport/API failures into [`YouTubeError`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::Instrument;

use crate::config::{ApiKey, YouTubeConfig};
use crate::observability::{TraceHeader, TRACE_HEADER};
use crate::youtube::error::{YouTubeError, YouTubeResult};
use crate::youtube::models::{ApiErrorEnvelope, VideoListResponse};

/// The only resource part ever requested.
pub const SNIPPET_PART: &str = "snippet";

/// Source of video metadata, injected into the HTTP layer.
#[async_trait]
pub trait VideoLookup: Send + Sync {
    /// List videos matching `video_id`, requesting only the snippet.
    async fn list_videos(
        &self,
        video_id: &str,
        trace: &TraceHeader,
    ) -> YouTubeResult<VideoListResponse>;
}

/// reqwest-backed [`VideoLookup`].
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
    timeout_ms: u64,
}

impl YouTubeClient {
    /// Build a client from configuration.
    pub fn new(config: &YouTubeConfig) -> YouTubeResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(YouTubeError::Transport)?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn videos_url(&self) -> String {
        format!("{}/videos", self.base_url)
    }

    // reqwest errors carry the request URL, which includes the key.
    fn map_send_error(&self, e: reqwest::Error) -> YouTubeError {
        if e.is_timeout() {
            YouTubeError::Timeout(self.timeout_ms)
        } else {
            YouTubeError::Transport(e.without_url())
        }
    }

    async fn fetch(&self, video_id: &str, trace: &TraceHeader) -> YouTubeResult<VideoListResponse> {
        let subsegment = trace.subsegment();

        tracing::debug!(
            video_id = %video_id,
            parent = subsegment.parent.as_deref().unwrap_or_default(),
            "Calling videos.list"
        );

        let response = self
            .client
            .get(self.videos_url())
            .query(&[
                ("part", SNIPPET_PART),
                ("id", video_id),
                ("key", self.api_key.expose()),
            ])
            .header(TRACE_HEADER, subsegment.to_string())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|env| env.error.message)
                .unwrap_or(body);
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| YouTubeError::Decode(e.to_string()))
    }
}

#[async_trait]
impl VideoLookup for YouTubeClient {
    async fn list_videos(
        &self,
        video_id: &str,
        trace: &TraceHeader,
    ) -> YouTubeResult<VideoListResponse> {
        let span = tracing::info_span!(
            "subsegment",
            upstream = "youtube.googleapis.com",
            video_id = %video_id,
        );

        self.fetch(video_id, trace).instrument(span).await
    }
}
