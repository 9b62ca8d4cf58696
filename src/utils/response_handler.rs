// Unified response system for consistent API responses
// Provides HandlerResponse struct and middleware for standardizing all responses

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{
        header::{
            HeaderName, ACCEPT_RANGES, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_RANGE,
            CONTENT_TYPE, ETAG, LAST_MODIFIED,
        },
        HeaderValue, Request, Response, response::Parts, StatusCode,
    },
    Json,
    middleware::Next,
    response::IntoResponse,
};
use chrono::Utc;
use http_body_util::BodyExt;
use tokio::time::timeout;
use tracing::{error, info, warn};
use std::{convert::Infallible, time::Duration};
use serde_json::{json, Value};
use serde::{Serialize, Deserialize};
use crate::utils::format::to_two_space_indented_json;

/// Standard JSON response format for all API endpoints
#[derive(Serialize, Deserialize)]
pub struct ResponseFormat {
    pub status: String,          // HTTP status text (e.g. "OK", "NOT_FOUND")
    pub code: u16,               // HTTP status code
    pub data: serde_json::Value, // Response payload
    pub messages: Vec<String>,   // Informational messages
    pub date: String,            // ISO timestamp
}

/// Convenience struct for building responses in handlers
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    pub status_code: StatusCode,
    pub data: serde_json::Value,
    pub messages: Vec<String>,
}

impl HandlerResponse {
    /// Creates a new response with specified status code
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            data: serde_json::Value::Null,
            messages: Vec::new(),
        }
    }

    /// Adds JSON data payload to the response
    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Adds an informational message to the response
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response: Response<Body> = Json(json!({
            "data": self.data,
            "messages": self.messages
        })).into_response();

        *response.status_mut() = self.status_code;

        // Store HandlerResponse in extensions for middleware processing
        response.extensions_mut().insert(self);
        response
    }
}

/// "Not Found" -> "NOT_FOUND"
fn format_status(parts: &Parts) -> String {
    parts.status
        .canonical_reason()
        .unwrap_or("UNKNOWN STATUS")
        .to_uppercase()
        .replace(' ', "_")
}

/// Turns a body that did not come from a HandlerResponse into envelope data:
/// JSON when it parses, text otherwise, null when empty
fn body_to_data(bytes: &Bytes) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }

    serde_json::from_slice::<Value>(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Logs the formatted response with proper JSON indentation
fn log_formatted_response(wrapped: &ResponseFormat) {
    match to_two_space_indented_json(wrapped) {
        Ok(spaced_json) => info!("\nFinal response:\n{}", spaced_json),
        Err(err) => error!("Failed to format response JSON: {:?}", err),
    }
}

/// Headers that describe the original body and would be wrong for the envelope
const BODY_DESCRIBING_HEADERS: [HeaderName; 6] = [
    CONTENT_LENGTH,
    CONTENT_ENCODING,
    CONTENT_RANGE,
    ETAG,
    LAST_MODIFIED,
    ACCEPT_RANGES,
];

/// Builds the final response with JSON content type
fn build_final_response(parts: Parts, wrapped: &ResponseFormat) -> Response<Body> {
    let json_body: Vec<u8> = serde_json::to_vec(wrapped).unwrap_or_else(|_| b"{}".to_vec());
    let mut new_parts: Parts = parts;

    for header in &BODY_DESCRIBING_HEADERS {
        new_parts.headers.remove(header);
    }
    new_parts.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Response::from_parts(new_parts, Body::from(json_body))
}

/// Whether a response without a HandlerResponse can be re-encoded as envelope data.
/// Bodiless statuses, encoded bodies and anything that is not JSON or plain
/// text (binary, html, event streams) are passed through untouched.
fn is_wrappable(parts: &Parts) -> bool {
    let status: StatusCode = parts.status;
    if status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED
    {
        return false;
    }

    if parts.headers.contains_key(CONTENT_ENCODING) {
        return false;
    }

    match parts.headers.get(CONTENT_TYPE).map(HeaderValue::to_str) {
        None => true,
        Some(Ok(content_type)) => {
            let mime: String = content_type
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json") || mime == "text/plain"
        }
        Some(Err(_)) => false,
    }
}

/// Middleware that wraps responses in the standard ResponseFormat structure.
/// Status and headers from the inner service are kept; only the body is enveloped.
/// Reading a body that is not a HandlerResponse is bounded by `body_timeout`.
pub async fn response_wrapper(
    State(body_timeout): State<Duration>,
    req: Request<Body>,
    next: Next,
) -> Result<Response<Body>, Infallible> {
    let response: Response<Body> = next.run(req).await;
    let (mut parts, body) = response.into_parts();

    let (messages, data) = match parts.extensions.remove::<HandlerResponse>() {
        Some(structured) => (structured.messages, structured.data),
        None if !is_wrappable(&parts) => {
            return Ok(Response::from_parts(parts, body));
        }
        None => match timeout(body_timeout, body.collect()).await {
            Ok(Ok(collected)) => (Vec::new(), body_to_data(&collected.to_bytes())),
            Ok(Err(err)) => {
                error!("Failed to read response body: {}", err);
                parts.status = StatusCode::INTERNAL_SERVER_ERROR;
                (vec!["Failed to read response body".to_string()], Value::Null)
            }
            Err(_) => {
                warn!("Response body not completed within {:?}", body_timeout);
                parts.status = StatusCode::REQUEST_TIMEOUT;
                (vec!["Request timed out".to_string()], Value::Null)
            }
        },
    };

    let wrapped: ResponseFormat = ResponseFormat {
        status: format_status(&parts),
        code: parts.status.as_u16(),
        data,
        messages,
        date: Utc::now().to_rfc3339(),
    };

    log_formatted_response(&wrapped);

    Ok(build_final_response(parts, &wrapped))
}
