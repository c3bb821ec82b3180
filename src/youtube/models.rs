//! YouTube Data API v3 wire models.
//!
//! Only the fields reachable through `part=snippet` are modelled.

use serde::{Deserialize, Serialize};

use crate::youtube::error::YouTubeError;

/// Response of `videos.list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

/// A single video resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    pub snippet: Option<Snippet>,
}

/// Basic video metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Snippet {
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: String,
}

/// Google API error envelope: `{"error": {"code": .., "message": ..}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl VideoListResponse {
    /// Title of the first matching video.
    ///
    /// `Ok(None)` when nothing matched.
    pub fn first_title(&self) -> Result<Option<&str>, YouTubeError> {
        match self.items.first() {
            None => Ok(None),
            Some(item) => item
                .snippet
                .as_ref()
                .map(|s| Some(s.title.as_str()))
                .ok_or_else(|| YouTubeError::MissingSnippet(item.id.clone())),
        }
    }
}
