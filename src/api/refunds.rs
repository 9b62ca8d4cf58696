// Refunds handler group. Mounted private by default; the visibility is
// reported through MountContext and left to an outer layer to enforce.

use axum::{routing::get, Router};

use crate::config::state::AppState;
use crate::routing::HandlerGroup;
use super::handler;

pub const GROUP_NAME: &str = "refunds";

pub struct RefundsRoutes;

impl HandlerGroup<AppState> for RefundsRoutes {
    fn name(&self) -> &str {
        GROUP_NAME
    }

    fn routes(&self) -> Router<AppState> {
        Router::new()
            .route("/", get(handler::describe_mount))
    }
}
