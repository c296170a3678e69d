//! Price, checkout and subscription integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn checkout_request() -> serde_json::Value {
    json!({
        "mode": "subscription",
        "success_url": "https://app.example/billing/success",
        "cancel_url": "https://app.example/billing/cancel",
        "line_items": [{ "price": "price_pro", "quantity": 1 }],
        "client_reference_id": "user-42"
    })
}

// ============================================================================
// Prices
// ============================================================================

#[tokio::test]
async fn list_prices_by_lookup_key() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/prices"))
        .and(query_param("lookup_keys[]", "pro_monthly"))
        .and(query_param("lookup_keys[]", "pro_yearly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "has_more": false,
            "data": [
                { "id": "price_m", "type": "recurring", "lookup_key": "pro_monthly" },
                { "id": "price_y", "type": "recurring", "lookup_key": "pro_yearly" }
            ]
        })))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .server
        .get("/v1/prices")
        .add_query_param("lookup_keys", "pro_monthly,pro_yearly")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["prices"][0]["id"], "price_m");
    assert_eq!(body["prices"][1]["type"], "recurring");
}

#[tokio::test]
async fn list_prices_without_keys() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/prices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "has_more": false,
            "data": []
        })))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness.server.get("/v1/prices").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["prices"], json!([]));
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn create_checkout_returns_url() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_abc",
            "url": "https://pay.example/session/abc"
        })))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .server
        .post("/v1/checkout")
        .json(&checkout_request())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["url"], "https://pay.example/session/abc");
}

#[tokio::test]
async fn create_checkout_without_url_is_server_error() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_abc",
            "url": null
        })))
        .mount(&harness.stripe)
        .await;

    let response = harness
        .server
        .post("/v1/checkout")
        .json(&checkout_request())
        .expect_failure()
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["message"], "Cannot create checkout session");
}

#[tokio::test]
async fn create_checkout_rejected_by_stripe_is_bad_request() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/checkout/sessions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "type": "invalid_request_error",
                "message": "No such price: 'price_pro'"
            }
        })))
        .mount(&harness.stripe)
        .await;

    let response = harness
        .server
        .post("/v1/checkout")
        .json(&checkout_request())
        .expect_failure()
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn get_checkout_session() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/checkout/sessions/cs_test_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_abc",
            "status": "complete",
            "payment_status": "paid",
            "url": null
        })))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness.server.get("/v1/checkout/cs_test_abc").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], "cs_test_abc");
    assert_eq!(body["payment_status"], "paid");
}

#[tokio::test]
async fn get_missing_checkout_session_is_not_found() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/checkout/sessions/cs_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "type": "invalid_request_error",
                "code": "resource_missing",
                "message": "No such checkout.session: 'cs_missing'"
            }
        })))
        .mount(&harness.stripe)
        .await;

    let response = harness
        .server
        .get("/v1/checkout/cs_missing")
        .expect_failure()
        .await;

    response.assert_status_not_found();
}

// ============================================================================
// Subscriptions
// ============================================================================

#[tokio::test]
async fn get_subscription() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/subscriptions/sub_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sub_1",
            "status": "past_due",
            "customer": "cus_1"
        })))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness.server.get("/v1/subscriptions/sub_1").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "past_due");
}

#[tokio::test]
async fn stripe_rate_limit_is_forwarded() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/subscriptions/sub_1"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "type": "rate_limit_error", "message": "Too many requests" }
        })))
        .mount(&harness.stripe)
        .await;

    let response = harness
        .server
        .get("/v1/subscriptions/sub_1")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
}

// ============================================================================
// Unconfigured
// ============================================================================

#[tokio::test]
async fn unconfigured_service_fails_without_calling_stripe() {
    let harness = TestHarness::unconfigured().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&harness.stripe)
        .await;

    let responses = [
        harness.server.get("/v1/prices").expect_failure().await,
        harness
            .server
            .post("/v1/checkout")
            .json(&checkout_request())
            .expect_failure()
            .await,
        harness
            .server
            .get("/v1/checkout/cs_test_abc")
            .expect_failure()
            .await,
        harness
            .server
            .get("/v1/subscriptions/sub_1")
            .expect_failure()
            .await,
    ];

    for response in responses {
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["code"], "internal_error");
    }
}
