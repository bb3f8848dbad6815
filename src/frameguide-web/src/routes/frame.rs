//! Frame action endpoint

use crate::{ApiError, AppState};
use axum::{extract::State, response::Html};
use bytes::Bytes;
use frameguide_frame::{navigate, Document, FrameRequest};
use tracing::{debug, info, warn};

/// POST /api - resolve the pressed button and render the next frame
pub async fn frame_action(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Html<String>, ApiError> {
    match next_frame(&state, &body) {
        Ok(document) => Ok(Html(document.into_string())),
        Err(err) => {
            warn!("frame request rejected: {}", err);
            Err(ApiError::frame(err, &state))
        }
    }
}

/// Any other method on /api
pub async fn frame_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed { allow: "POST" }
}

fn next_frame(state: &AppState, body: &[u8]) -> frameguide_frame::Result<Document> {
    let request = FrameRequest::from_json(body)?;
    let navigation = request.navigation_request(state.catalog)?;
    let result = navigate(state.catalog, navigation)?;
    let page = state.catalog.page_at(result.resolved_page)?;

    info!(
        fid = ?request.fid(),
        previous = navigation.previous_page,
        button = navigation.pressed_button,
        page = result.resolved_page,
        "frame navigation"
    );
    debug!("rendering {} button(s) for page {}", page.buttons.len(), page.number);

    Ok(state.renderer.render(page, &state.base_url))
}
