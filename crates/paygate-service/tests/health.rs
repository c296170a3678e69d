//! Health check integration tests.

mod common;

use common::TestHarness;

#[tokio::test]
async fn health_reports_stripe_configured() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "paygate");
    assert_eq!(body["stripe_configured"], true);
}

#[tokio::test]
async fn health_reports_stripe_missing() {
    let harness = TestHarness::unconfigured().await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["stripe_configured"], false);
}
