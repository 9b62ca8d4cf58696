// Global error handling for HTTP middleware layers

use axum::{
    BoxError,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::error::Error;
// tower's error type for timeouts
use tower::timeout::error::Elapsed;
// Axum uses http_body_util for length-limiting
use http_body_util::LengthLimitError;
use tracing::warn;

use crate::utils::response_handler::HandlerResponse;

/// Maps errors raised by the middleware stack to HTTP responses
pub async fn handle_global_error(err: BoxError) -> impl IntoResponse {
    // 408 if the request took too long
    if err.is::<Elapsed>() {
        warn!("Request exceeded the configured timeout");
        return HandlerResponse::new(StatusCode::REQUEST_TIMEOUT)
            .message("Request timed out");
    }

    // 413 if the body was too large
    if err.is::<LengthLimitError>() || find_cause::<LengthLimitError>(&*err).is_some() {
        return HandlerResponse::new(StatusCode::PAYLOAD_TOO_LARGE)
            .message("Request body too large");
    }

    // Otherwise, 500
    warn!("Unhandled middleware error: {}", err);
    HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
        .data(json!({ "error": err.to_string() }))
        .message("Unhandled internal error")
}

/// Helper function to find specific error type in error chain
pub fn find_cause<T: Error + 'static>(err: &dyn Error) -> Option<&T> {
    let mut source: Option<&dyn Error> = err.source();

    while let Some(s) = source {
        if let Some(typed) = s.downcast_ref::<T>() {
            return Some(typed);
        }
        source = s.source();
    }

    None
}
