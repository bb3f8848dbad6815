//! Root redirect to the static infographic

use crate::{ApiError, AppState};
use axum::{extract::State, response::Redirect};

/// GET / - temporary redirect to the infographic document
pub async fn redirect_to_infographic(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.renderer.infographic_path)
}

/// Any other method on /
pub async fn index_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed { allow: "GET" }
}
