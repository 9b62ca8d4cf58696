//! tests/global_errors/404.rs
//! Ensures that a path outside every mounted prefix returns HTTP 404.

// Include the helper module defined in tests/common/mod.rs.
#[path = "../common/mod.rs"]
mod common;

use reqwest::StatusCode;

#[tokio::test]
async fn returns_404_for_unmounted_prefix() {
    let base_url: String = common::spawn_echo_app();

    let (status, json) = common::get_json(&base_url, "/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], "NOT_FOUND");
    assert_eq!(json["code"], 404);
    assert_eq!(json["data"]["path"], "/does-not-exist");
}

#[tokio::test]
async fn returns_404_for_prefix_lookalike() {
    let base_url: String = common::spawn_echo_app();

    // "/usersxyz" shares characters with "/users" but not a segment
    let (status, json) = common::get_json(&base_url, "/usersxyz/1").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["data"]["path"], "/usersxyz/1");
}

#[tokio::test]
async fn unmatched_route_inside_group_is_the_groups_404() {
    let base_url: String = common::spawn_default_app();

    let (status, json) = common::get_json(&base_url, "/users/42").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], 404);
    assert!(json["data"].is_null());
}
