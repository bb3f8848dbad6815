//! HTTP error responses

use crate::state::AppState;
use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use frameguide_frame::{Document, FrameError};

/// API error types
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A frame request that could not be served. Clients only understand
    /// frames, so the response is the degraded frame rather than JSON.
    #[error("frame error: {source}")]
    Frame {
        source: FrameError,
        fallback: Document,
    },

    #[error("method not allowed, expected {allow}")]
    MethodNotAllowed { allow: &'static str },
}

impl ApiError {
    /// Wrap a frame error together with the degraded frame for this deployment
    pub fn frame(source: FrameError, state: &AppState) -> Self {
        let fallback = state
            .renderer
            .render_error(&state.base_url, state.catalog.size());
        ApiError::Frame { source, fallback }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Frame { fallback, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(fallback.into_string()),
            )
                .into_response(),
            ApiError::MethodNotAllowed { allow } => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, allow)],
                "Method Not Allowed",
            )
                .into_response(),
        }
    }
}

