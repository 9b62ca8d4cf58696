// Users handler group

use axum::{routing::get, Router};

use crate::config::state::AppState;
use crate::routing::HandlerGroup;
use super::handler;

pub const GROUP_NAME: &str = "users";

pub struct UsersRoutes;

impl HandlerGroup<AppState> for UsersRoutes {
    fn name(&self) -> &str {
        GROUP_NAME
    }

    fn routes(&self) -> Router<AppState> {
        Router::new()
            .route("/", get(handler::describe_mount))
    }
}
