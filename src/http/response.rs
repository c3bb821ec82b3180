//! Response bodies and error-to-status mapping.
//!
//! Two failure kinds exist: the upstream call failed (500) or it returned
//! no matching video (404). Both are logged where they are converted.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::youtube::YouTubeError;

pub const OK_BODY: &str = "ok";
pub const INTERNAL_ERROR_BODY: &str = "internal server error";
pub const NOT_FOUND_BODY: &str = "message not found";

/// Failure of a video title lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Upstream(#[from] YouTubeError),

    #[error("no video matches id '{0}'")]
    NotFound(String),
}

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        match &self {
            LookupError::Upstream(e) => {
                tracing::error!(error = %e, "Video lookup failed");
                (self.status(), INTERNAL_ERROR_BODY).into_response()
            }
            LookupError::NotFound(id) => {
                tracing::warn!(video_id = %id, "{}", NOT_FOUND_BODY);
                (self.status(), NOT_FOUND_BODY).into_response()
            }
        }
    }
}
