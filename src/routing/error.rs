// Typed errors raised while registering bindings or dispatching requests

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::utils::response_handler::HandlerResponse;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Two handler groups cannot share a prefix
    #[error("prefix `{prefix}` is already bound to handler group `{existing_group}`")]
    DuplicatePrefix {
        prefix: String,
        existing_group: String,
    },

    #[error("invalid route prefix `{prefix}`: {reason}")]
    InvalidPrefix {
        prefix: String,
        reason: &'static str,
    },

    /// No binding matches the request path
    #[error("no route matches `{path}`")]
    NotFound { path: String },

    #[error("could not rewrite request uri `{uri}`")]
    InvalidUri { uri: String },
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let response: HandlerResponse = match self {
            RouteError::NotFound { path } => HandlerResponse::new(StatusCode::NOT_FOUND)
                .data(json!({ "path": path }))
                .message("The requested route does not exist"),
            RouteError::InvalidUri { uri } => HandlerResponse::new(StatusCode::BAD_REQUEST)
                .data(json!({ "uri": uri }))
                .message("Malformed request uri"),
            // Registration errors abort startup and never reach a client
            other => HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
                .message(other.to_string()),
        };

        response.into_response()
    }
}
