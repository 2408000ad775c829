// domain-scout-server/tests/api.rs

//! Handler-level tests driving the router in-process.
//!
//! The pipeline runs in its offline profile (heuristic resolver, in-memory
//! store), so these are deterministic and make no network calls.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use domain_scout_lib::{ResolverConfig, ScoutConfig};
use domain_scout_server::api::{router, AppState};

fn offline_app() -> Router {
    let config = ScoutConfig {
        resolver: ResolverConfig::offline(),
        ..Default::default()
    };
    let state = Arc::new(AppState::from_config(&config).unwrap());
    router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
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

#[tokio::test]
async fn test_generate_happy_path() {
    let app = offline_app();

    let request = post_json(
        "/api/domains/generate",
        serde_json::json!({
            "query": "tech startup",
            "filters": { "targetCount": 5 }
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 5);
    let domains = json["domains"].as_array().unwrap();
    assert_eq!(domains.len(), 5);

    let first = &domains[0];
    assert!(first["name"].as_str().unwrap().ends_with(".com"));
    assert!(first["registrarQuotes"].is_object());
    assert!(first["price"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_generate_empty_query_is_400() {
    let app = offline_app();

    let request = post_json(
        "/api/domains/generate",
        serde_json::json!({ "query": "!!!" }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("keywords"));
}

#[tokio::test]
async fn test_generate_bad_filter_is_400() {
    let app = offline_app();

    let request = post_json(
        "/api/domains/generate",
        serde_json::json!({
            "query": "tech",
            "filters": { "minPrice": 50.0, "maxPrice": 10.0 }
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_google_reports_taken() {
    let app = offline_app();

    let request = post_json(
        "/api/domains/check",
        serde_json::json!({ "domain": "google.com" }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["domain"], "google.com");
    assert_eq!(json["isAvailable"], false);
    assert!(json["quotes"]["quotes"]["GoDaddy"].is_object());
    assert!(json["metrics"]["seoScore"].is_number());
    assert!(json["record"].is_null());
}

#[tokio::test]
async fn test_check_invalid_domain_is_400() {
    let app = offline_app();

    let request = post_json(
        "/api/domains/check",
        serde_json::json!({ "domain": "not a domain" }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_returns_persisted_rows_only() {
    let app = offline_app();

    // Nothing generated yet: search is empty
    let response = app
        .clone()
        .oneshot(get("/api/domains/search?q=tech"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);

    // Generate, then search the same app instance
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/domains/generate",
            serde_json::json!({ "query": "tech", "filters": { "targetCount": 6 } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/domains/search?sortBy=price-asc"))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["total"], 6);

    let prices: Vec<f64> = json["domains"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["price"].as_f64().unwrap())
        .collect();
    for pair in prices.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[tokio::test]
async fn test_get_by_id_and_404() {
    let app = offline_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/domains/generate",
            serde_json::json!({ "query": "gadget", "filters": { "targetCount": 1 } }),
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    let id = json["domains"][0]["id"].as_u64().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/domains/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"].as_u64().unwrap(), id);

    let response = app.oneshot(get("/api/domains/999999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recent_searches_feed() {
    let app = offline_app();

    for query in ["first idea", "second idea"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/domains/generate",
                serde_json::json!({ "query": query, "filters": { "targetCount": 2 } }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get("/api/searches/recent?limit=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["query"], "second idea");
    assert_eq!(rows[0]["resultsCount"], 2);
}
