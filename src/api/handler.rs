// Handlers shared by the stock handler groups

use serde_json::json;
use axum::{http::{StatusCode, Uri}, extract::State, Extension};
use tracing::{instrument, info};

use crate::config::state::AppState;
use crate::routing::MountContext;
use crate::utils::response_handler::HandlerResponse;

/// Describes the binding serving this request: group, prefix, visibility and paths
#[instrument(skip_all, fields(group = %mount.group, request_id = %mount.request_id))]
pub async fn describe_mount(
    State(state): State<AppState>,
    Extension(mount): Extension<MountContext>,
    uri: Uri,
) -> HandlerResponse {
    info!("Mount descriptor requested");

    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "group": mount.group,
            "prefix": mount.prefix.as_str(),
            "visibility": mount.visibility,
            "effective_path": uri.path(),
            "original_path": mount.original_uri.path(),
            "environment": state.environment.environment.as_ref(),
        }))
        .message(format!("Handler group '{}' is mounted at {}", mount.group, mount.prefix))
}
