//! tests/global_errors/408.rs
//! Ensures that requests taking too long result in a 408 timeout.

#[path = "../common/mod.rs"]
mod common;

use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn returns_408_when_group_handler_times_out() {
    let base_url: String = common::spawn_echo_app();

    // The slow route sleeps past the 1 second server timeout from test_env()
    let resp_result: Result<Result<reqwest::Response, reqwest::Error>, tokio::time::error::Elapsed> = timeout(
        Duration::from_secs(5), // client-side timeout duration
        async {
            reqwest::Client::new()
                .get(format!("{}/users/slow", base_url))
                .send()
                .await
        }
    )
    .await;

    // Ensure the client did not timeout waiting for a response.
    assert!(resp_result.is_ok(), "Client timed out waiting for server.");

    let resp: reqwest::Response = resp_result.unwrap().expect("Request failed unexpectedly.");

    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);

    let json: serde_json::Value = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
    assert_eq!(json["status"], "REQUEST_TIMEOUT");
    assert_eq!(json["code"], 408);
}

#[tokio::test]
async fn returns_408_when_group_body_never_finishes() {
    let base_url: String = common::spawn_echo_app();

    // Headers arrive immediately; the body stalls past the 1 second server timeout
    let resp_result: Result<Result<reqwest::Response, reqwest::Error>, tokio::time::error::Elapsed> = timeout(
        Duration::from_secs(5),
        async {
            reqwest::Client::new()
                .get(format!("{}/sessions/stalled", base_url))
                .send()
                .await
        }
    )
    .await;

    assert!(resp_result.is_ok(), "Client timed out waiting for server.");

    let resp: reqwest::Response = resp_result.unwrap().expect("Request failed unexpectedly.");

    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);

    let json: serde_json::Value = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
    assert_eq!(json["status"], "REQUEST_TIMEOUT");
    assert_eq!(json["code"], 408);
}
