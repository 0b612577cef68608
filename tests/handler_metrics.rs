mod common;

use serde_json::json;

use common::{StubProbe, create_link, spawn_app, test_config, wait_until};
use linkgate::domain::reachability::Reachability;
use linkgate::workers::{REDIRECT_COUNTER, URI_COUNTER};

#[tokio::test]
async fn test_gauges_follow_storage() {
    let app = spawn_app(test_config(), StubProbe::new());

    create_link(&app.server, json!({ "url": "https://a.example/" })).await;
    let hash = create_link(&app.server, json!({ "url": "https://b.example/" })).await;
    wait_until(|| {
        app.state.reachability_service.is_reachable("https://b.example/")
            == Reachability::Reachable
    })
    .await;
    app.server.get(&format!("/{}", hash)).await;
    wait_until(|| app.clicks.count_for(&hash) == 1).await;

    wait_until(|| {
        app.state.gauges.get(URI_COUNTER) == Some(2.0)
            && app.state.gauges.get(REDIRECT_COUNTER) == Some(1.0)
    })
    .await;

    let response = app.server.get("/api/metrics").await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["gauges"][URI_COUNTER], 2.0);
    assert_eq!(body["gauges"][REDIRECT_COUNTER], 1.0);
}

#[tokio::test]
async fn test_metrics_lists_queues() {
    let app = spawn_app(test_config(), StubProbe::new());

    let response = app.server.get("/api/metrics").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    let names: Vec<&str> = body["queues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["reachability", "qr", "click"]);
    assert_eq!(body["queues"][2]["capacity"], 10000);
    assert_eq!(body["queues"][0]["closed"], false);
}
