//! Integration tests for roster endpoints.
//!
//! Require a running PostgreSQL instance. Set TEST_DATABASE_URL to enable;
//! the tests skip themselves when it is absent.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    count_roster_rows, create_active_vendor, create_test_app, create_test_coordinator,
    create_test_wedding, get_request, json_request, parse_response_body, unique_email,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_add_vendor_to_roster() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };

    let coordinator_id = create_test_coordinator(&pool).await;
    let wedding_id = create_test_wedding(&pool, coordinator_id).await;
    let vendor_id = create_active_vendor(&pool, &unique_email("vendor")).await;

    let app = create_test_app(pool.clone());
    let request = json_request(
        Method::POST,
        "/api/v1/roster",
        json!({
            "wedding_id": wedding_id,
            "vendor_id": vendor_id,
            "service_hours": 6.0,
            "service_rate": 150.0
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["wedding_id"], wedding_id.to_string());
    assert_eq!(body["vendor_id"], vendor_id.to_string());

    assert_eq!(count_roster_rows(&pool, wedding_id).await, 1);
}

#[tokio::test]
async fn test_double_add_conflicts() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };

    let coordinator_id = create_test_coordinator(&pool).await;
    let wedding_id = create_test_wedding(&pool, coordinator_id).await;
    let vendor_id = create_active_vendor(&pool, &unique_email("vendor")).await;

    let body = json!({ "wedding_id": wedding_id, "vendor_id": vendor_id });

    let app = create_test_app(pool.clone());
    let response = app
        .oneshot(json_request(Method::POST, "/api/v1/roster", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = create_test_app(pool.clone());
    let response = app
        .oneshot(json_request(Method::POST, "/api/v1/roster", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    assert_eq!(count_roster_rows(&pool, wedding_id).await, 1);
}

#[tokio::test]
async fn test_roster_listing_includes_recommendations() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };

    let coordinator_id = create_test_coordinator(&pool).await;
    let wedding_id = create_test_wedding(&pool, coordinator_id).await;
    let vendor_id = create_active_vendor(&pool, &unique_email("vendor")).await;

    let app = create_test_app(pool.clone());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/roster",
            json!({
                "wedding_id": wedding_id,
                "vendor_id": vendor_id,
                "service_hours": 8.0,
                "service_rate": 200.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = create_test_app(pool.clone());
    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/weddings/{}/roster",
            wedding_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    // 8h x $200 photographer: 15/20/25 percent of $1600.
    assert_eq!(entries[0]["recommendation"]["low"], 240);
    assert_eq!(entries[0]["recommendation"]["medium"], 320);
    assert_eq!(entries[0]["recommendation"]["high"], 400);
}
