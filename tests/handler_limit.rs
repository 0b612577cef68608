mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{StubProbe, create_link, spawn_app, test_config, wait_until};
use linkgate::domain::reachability::Reachability;

#[tokio::test]
async fn test_limit_reports_consumption() {
    let app = spawn_app(test_config(), StubProbe::new());
    let hash = create_link(
        &app.server,
        json!({ "url": "https://example.com/limited", "limit": 3 }),
    )
    .await;
    wait_until(|| {
        app.state
            .reachability_service
            .is_reachable("https://example.com/limited")
            == Reachability::Reachable
    })
    .await;

    app.server
        .get(&format!("/{}", hash))
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    let path = format!("/api/link/{}/limit", hash);
    let response = app.server.get(&path).await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["hash"], hash);
    assert_eq!(body["limit"], 3);
    assert_eq!(body["consumed"], 1);
    assert_eq!(body["remaining"], 2);
    assert_eq!(body["window_seconds"], 3600);

    // Inspection does not consume.
    let again = app.server.get(&path).await.json::<serde_json::Value>();
    assert_eq!(again["consumed"], 1);
}

#[tokio::test]
async fn test_limit_unlimited_link() {
    let app = spawn_app(test_config(), StubProbe::new());
    let hash = create_link(&app.server, json!({ "url": "https://example.com" })).await;

    let response = app.server.get(&format!("/api/link/{}/limit", hash)).await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_limit_unknown_hash() {
    let app = spawn_app(test_config(), StubProbe::new());

    let response = app.server.get("/api/link/ffffffff/limit").await;

    response.assert_status_not_found();
}
