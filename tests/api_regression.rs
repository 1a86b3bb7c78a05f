//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! the /api/v1/* endpoints using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port.

use diabetes_check::api::{create_app, ApiState};
use diabetes_check::config::AppConfig;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    create_app(ApiState::new(AppConfig::default()))
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// All v1 GET lookup endpoints should return 200.
#[tokio::test]
async fn test_v1_get_endpoints_return_200() {
    let endpoints = [
        "/health",
        "/api/v1/rules",
        "/api/v1/reference",
        "/api/v1/guide",
        "/api/v1/config",
        "/api/v1/metrics",
        "/api/v1/recommendations/high",
        "/api/v1/recommendations/medium",
        "/api/v1/recommendations/low",
    ];

    for endpoint in &endpoints {
        let resp = test_app().oneshot(get(endpoint)).await.unwrap();
        assert!(
            resp.status().is_success(),
            "GET {endpoint} returned status {}",
            resp.status()
        );
    }
}

#[tokio::test]
async fn test_assess_returns_screening_envelope() {
    let body = json!({"glucose": 130.0, "bmi": 31.0, "age": 50, "insulin": 60.0});
    let resp = test_app()
        .oneshot(post_json("/api/v1/assess", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let v = body_json(resp).await;
    assert_eq!(v["meta"]["version"], "1");
    let data = &v["data"];
    assert_eq!(data["score"], 75);
    assert_eq!(data["tier"], "high");
    assert_eq!(data["severity"], "high");
    assert_eq!(data["message"], "Further testing recommended");
    assert_eq!(
        data["factors"],
        json!([
            "high glucose (126–199 mg/dL)",
            "high BMI (30–34.9)",
            "middle age (45–64)",
            "borderline insulin (50–99 μIU/mL)"
        ])
    );
    assert_eq!(data["recommendation"]["severity"], "high");
    assert!(!data["recommendation"]["actions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_assess_low_risk_has_maintenance_advice() {
    let body = json!({"glucose": 110.0, "bmi": 22.0, "age": 30, "insulin": 10.0});
    let resp = test_app()
        .oneshot(post_json("/api/v1/assess", &body))
        .await
        .unwrap();
    let v = body_json(resp).await;
    assert_eq!(v["data"]["score"], 15);
    assert_eq!(v["data"]["tier"], "low");
    assert_eq!(v["data"]["recommendation"]["severity"], "low");
}

#[tokio::test]
async fn test_assess_zero_field_is_incomplete() {
    let body = json!({"glucose": 130.0, "bmi": 0.0, "age": 50, "insulin": 60.0});
    let resp = test_app()
        .oneshot(post_json("/api/v1/assess", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let v = body_json(resp).await;
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(v["error"]["field"], "bmi");
    assert!(v["error"]["message"]
        .as_str()
        .unwrap()
        .contains("please complete all input fields"));
}

#[tokio::test]
async fn test_assess_missing_field_is_incomplete() {
    let body = json!({"glucose": 130.0, "bmi": 31.0, "age": 50});
    let resp = test_app()
        .oneshot(post_json("/api/v1/assess", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["error"]["field"], "insulin");
}

#[tokio::test]
async fn test_assess_out_of_range_is_rejected() {
    let body = json!({"glucose": 130.0, "bmi": 31.0, "age": 150, "insulin": 60.0});
    let resp = test_app()
        .oneshot(post_json("/api/v1/assess", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["error"]["field"], "age");
}

#[tokio::test]
async fn test_assess_malformed_json_is_bad_request() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/assess")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"glucose\": 130,"))
        .unwrap();
    let resp = test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_batch_preserves_order() {
    let body = json!([
        {"glucose": 210.0, "bmi": 36.0, "age": 70, "insulin": 210.0},
        {"glucose": 110.0, "bmi": 22.0, "age": 30, "insulin": 10.0},
        {"glucose": 130.0, "bmi": 31.0, "age": 50, "insulin": 60.0}
    ]);
    let resp = test_app()
        .oneshot(post_json("/api/v1/assess/batch", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let v = body_json(resp).await;
    assert_eq!(v["data"]["count"], 3);
    let scores: Vec<u64> = v["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["score"].as_u64().unwrap())
        .collect();
    assert_eq!(scores, [105, 15, 75]);
}

#[tokio::test]
async fn test_batch_invalid_item_names_index() {
    let body = json!([
        {"glucose": 110.0, "bmi": 22.0, "age": 30, "insulin": 10.0},
        {"glucose": 110.0, "bmi": 22.0, "age": 30}
    ]);
    let resp = test_app()
        .oneshot(post_json("/api/v1/assess/batch", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let v = body_json(resp).await;
    assert!(v["error"]["message"].as_str().unwrap().starts_with("item 1:"));
}

#[tokio::test]
async fn test_empty_batch_is_bad_request() {
    let resp = test_app()
        .oneshot(post_json("/api/v1/assess/batch", &json!([])))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_severity_is_not_found() {
    let resp = test_app()
        .oneshot(get("/api/v1/recommendations/critical"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reference_rows_follow_rule_table() {
    let resp = test_app().oneshot(get("/api/v1/reference")).await.unwrap();
    let v = body_json(resp).await;
    assert_eq!(v["data"]["normal"]["glucose"], 100.0);
    assert_eq!(v["data"]["normal"]["bmi"], 25.0);
    assert_eq!(v["data"]["high"]["glucose"], 126.0);
    assert_eq!(v["data"]["high"]["age"], 65.0);
}

#[tokio::test]
async fn test_rules_lists_four_groups() {
    let resp = test_app().oneshot(get("/api/v1/rules")).await.unwrap();
    let v = body_json(resp).await;
    assert_eq!(v["data"]["groups"].as_array().unwrap().len(), 4);
    assert_eq!(v["data"]["max_score"], 105);
}

/// Metrics count evaluations and rejections made through the same state.
#[tokio::test]
async fn test_metrics_reflect_traffic() {
    let app = test_app();

    let ok = json!({"glucose": 210.0, "bmi": 36.0, "age": 70, "insulin": 210.0});
    let bad = json!({"glucose": 0.0, "bmi": 36.0, "age": 70, "insulin": 210.0});
    for body in [&ok, &ok, &bad] {
        app.clone()
            .oneshot(post_json("/api/v1/assess", body))
            .await
            .unwrap();
    }

    let resp = app.oneshot(get("/api/v1/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("diabetes_check_evaluations_total 2\n"), "{text}");
    assert!(text.contains("diabetes_check_rejected_total 1\n"), "{text}");
    assert!(text.contains("diabetes_check_tier_total{tier=\"very-high\"} 2\n"), "{text}");
}

#[tokio::test]
async fn test_health_returns_ok() {
    let resp = test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let v = body_json(resp).await;
    assert_eq!(v["status"], "ok");
}
