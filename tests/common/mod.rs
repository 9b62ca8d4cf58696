//! tests/common/mod.rs
//! Shared helpers: test handler groups and spawning the app on an ephemeral port.
#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    serve, Extension, Router,
};
use refunds_api::config::{environment::EnvironmentVariables, state::AppState};
use refunds_api::core::server::{build_aggregator, create_app};
use refunds_api::routing::{HandlerGroup, MountContext, RouteAggregator, Visibility};
use refunds_api::utils::response_handler::HandlerResponse;
use serde_json::json;
use tokio::net::TcpListener as TokioTcpListener;

/// Handler group that reports which group served the request and with what path.
/// Also carries slow, stalled, upload, failing and gzip routes for the
/// global error and pass-through tests.
pub struct EchoGroup(pub &'static str);

impl HandlerGroup<AppState> for EchoGroup {
    fn name(&self) -> &str {
        self.0
    }

    fn routes(&self) -> Router<AppState> {
        let name: &'static str = self.0;

        Router::new()
            .route("/slow", get(slow_handler))
            .route("/upload", post(upload_handler))
            .route("/fail", get(failing_handler))
            .route("/stalled", get(stalled_body_handler))
            .route("/archive", get(gzip_handler))
            .fallback(move |uri: Uri, Extension(mount): Extension<MountContext>| async move {
                HandlerResponse::new(StatusCode::OK).data(json!({
                    "group": name,
                    "effective_path": uri.path(),
                    "query": uri.query(),
                    "visibility": mount.visibility,
                    "original_path": mount.original_uri.path(),
                }))
            })
    }
}

async fn slow_handler(State(state): State<AppState>) -> HandlerResponse {
    let timeout_seconds: u64 = state.environment.default_timeout_seconds;
    tokio::time::sleep(Duration::from_secs(timeout_seconds + 2)).await;
    HandlerResponse::new(StatusCode::OK).message("This should not be reached due to timeout")
}

/// Sends the response head at once, then a body that never completes
async fn stalled_body_handler() -> Body {
    Body::from_stream(futures_util::stream::pending::<Result<Bytes, std::io::Error>>())
}

/// Gzip member header bytes as an already-encoded body
pub const GZIP_BYTES: [u8; 10] = [0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff];

async fn gzip_handler() -> impl IntoResponse {
    (
        [
            (header::CONTENT_ENCODING, "gzip"),
            (header::CONTENT_TYPE, "application/json"),
            (header::ETAG, "\"archive-v1\""),
        ],
        GZIP_BYTES.to_vec(),
    )
}

async fn upload_handler(body: Bytes) -> HandlerResponse {
    HandlerResponse::new(StatusCode::OK).data(json!({ "received": body.len() }))
}

async fn failing_handler() -> HandlerResponse {
    HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
        .data(json!({ "error_type": "deliberate_test_error" }))
        .message("Deliberate 500 error for testing purposes")
}

/// Defaults with a short timeout and a small body limit
pub fn test_env() -> EnvironmentVariables {
    EnvironmentVariables {
        default_timeout_seconds: 1,
        max_request_body_size: 1024,
        ..EnvironmentVariables::default()
    }
}

/// `/users`, `/sessions` and `/refunds` backed by echo groups
pub fn echo_aggregator(state: &AppState) -> RouteAggregator {
    RouteAggregator::builder(state.clone())
        .mount("/users", Visibility::Public, &EchoGroup("users"))
        .and_then(|b| b.mount("/sessions", Visibility::Public, &EchoGroup("sessions")))
        .and_then(|b| b.mount("/refunds", Visibility::Private, &EchoGroup("refunds")))
        .expect("echo bindings are disjoint")
        .build()
}

/// Spawns the app on a random unused port and returns its base URL.
pub fn spawn_app(env: &EnvironmentVariables, aggregator: RouteAggregator) -> String {
    let app: Router = create_app(env, aggregator);

    // * Bind an ephemeral port using std::net::TcpListener.
    let std_listener: std::net::TcpListener = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    std_listener.set_nonblocking(true).unwrap();

    // * Convert std::net::TcpListener to tokio::net::TcpListener.
    let tokio_listener: TokioTcpListener = TokioTcpListener::from_std(std_listener)
        .expect("Failed to convert to tokio listener");

    let addr: std::net::SocketAddr = tokio_listener.local_addr().unwrap();

    // * Spawn the server in a background task.
    tokio::spawn(async move {
        serve(tokio_listener, app)
            .await
            .expect("Server failed");
    });

    // * Return the base URL, e.g. "http://127.0.0.1:12345".
    format!("http://{}", addr)
}

/// App with the echo groups mounted
pub fn spawn_echo_app() -> String {
    let env: EnvironmentVariables = test_env();
    let state: AppState = AppState::new(env.clone());
    spawn_app(&env, echo_aggregator(&state))
}

/// App with the stock handler groups resolved from the mount table
pub fn spawn_default_app() -> String {
    let env: EnvironmentVariables = test_env();
    let state: AppState = AppState::new(env.clone());
    let aggregator: RouteAggregator = build_aggregator(&state).expect("default mount table");
    spawn_app(&env, aggregator)
}

/// GET `path` and return the status with the parsed envelope
pub async fn get_json(base_url: &str, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to execute request.");

    let status: reqwest::StatusCode = resp.status();
    let body: String = resp.text().await.unwrap();
    (status, serde_json::from_str(&body).unwrap())
}
