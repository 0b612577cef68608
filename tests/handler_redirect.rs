mod common;

use axum::http::{StatusCode, header};
use serde_json::json;
use std::time::Duration;

use common::{StubProbe, create_link, spawn_app, test_config, wait_until};
use linkgate::domain::reachability::Reachability;

const TARGET: &str = "https://example.com/landing";

async fn wait_for_verdict(app: &common::TestApp, expected: Reachability) {
    wait_until(|| app.state.reachability_service.is_reachable(TARGET) == expected).await;
}

#[tokio::test]
async fn test_redirect_unknown_hash() {
    let app = spawn_app(test_config(), StubProbe::new());

    let response = app.server.get("/deadbeef").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_before_verification() {
    let app = spawn_app(test_config(), StubProbe::slow(Duration::from_secs(30)));
    let hash = create_link(&app.server, json!({ "url": TARGET })).await;

    let response = app.server.get(&format!("/{}", hash)).await;

    response.assert_status_bad_request();
    assert_eq!(response.header(header::RETRY_AFTER), "10");
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_ready"
    );
}

#[tokio::test]
async fn test_redirect_success_records_click() {
    let app = spawn_app(test_config(), StubProbe::new());
    let hash = create_link(&app.server, json!({ "url": TARGET })).await;
    wait_for_verdict(&app, Reachability::Reachable).await;

    let response = app
        .server
        .get(&format!("/{}", hash))
        .add_header(header::USER_AGENT, "integration-test")
        .await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header(header::LOCATION), TARGET);

    wait_until(|| app.clicks.count_for(&hash) == 1).await;
}

#[tokio::test]
async fn test_redirect_unreachable_target() {
    let probe = StubProbe::new().respond(TARGET, 503);
    let app = spawn_app(test_config(), probe);
    let hash = create_link(&app.server, json!({ "url": TARGET, "limit": 1 })).await;
    wait_for_verdict(&app, Reachability::Unreachable).await;

    assert_eq!(app.probe.calls(TARGET), 3);

    for _ in 0..3 {
        let response = app.server.get(&format!("/{}", hash)).await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<serde_json::Value>()["error"]["code"],
            "unreachable"
        );
    }
    assert_eq!(app.clicks.count_for(&hash), 0);
}

#[tokio::test]
async fn test_redirect_rate_limited() {
    let app = spawn_app(test_config(), StubProbe::new());
    let hash = create_link(&app.server, json!({ "url": TARGET, "limit": 2 })).await;
    wait_for_verdict(&app, Reachability::Reachable).await;
    let path = format!("/{}", hash);

    app.server
        .get(&path)
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
    app.server
        .get(&path)
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    let response = app.server.get(&path).await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "rate_limited"
    );
}

#[tokio::test]
async fn test_redirect_follows_verdict_of_latest_check() {
    let app = spawn_app(test_config(), StubProbe::new());
    let hash = create_link(&app.server, json!({ "url": TARGET })).await;
    wait_for_verdict(&app, Reachability::Reachable).await;
    let path = format!("/{}", hash);

    app.server
        .get(&path)
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    // The target goes down; creating the same URL again schedules a fresh check.
    app.probe.set_status(TARGET, 503);
    create_link(&app.server, json!({ "url": TARGET })).await;
    wait_for_verdict(&app, Reachability::Unreachable).await;
    assert_eq!(app.probe.calls(TARGET), 4);

    let response = app.server.get(&path).await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "unreachable"
    );
}
