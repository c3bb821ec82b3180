//! Route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};

use crate::http::response::{LookupError, INTERNAL_ERROR_BODY, OK_BODY};
use crate::http::server::AppState;
use crate::observability::metrics::{self, LookupOutcome};
use crate::observability::TraceHeader;

/// `GET /`
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, OK_BODY)
}

/// `GET /500`, always fails.
pub async fn internal_error() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY)
}

/// `GET /youtube-video/{video_id}`: relay the title of the matching video.
pub async fn video_title(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Extension(trace): Extension<TraceHeader>,
) -> Result<String, LookupError> {
    let result = lookup_title(&state, &video_id, &trace).await;

    metrics::record_lookup(match &result {
        Ok(_) => LookupOutcome::Found,
        Err(LookupError::NotFound(_)) => LookupOutcome::NotFound,
        Err(LookupError::Upstream(_)) => LookupOutcome::Failed,
    });

    result
}

async fn lookup_title(
    state: &AppState,
    video_id: &str,
    trace: &TraceHeader,
) -> Result<String, LookupError> {
    let response = state.videos.list_videos(video_id, trace).await?;

    let title = response
        .first_title()?
        .ok_or_else(|| LookupError::NotFound(video_id.to_string()))?
        .to_string();

    tracing::info!(video_id = %video_id, title = %title, "Video title resolved");
    Ok(title)
}
