use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use flightboard_core::{EnrichmentConfig, RouteRecord, RouteSource};
use flightboard_provider::{DisabledProvider, RouteProvider};
use flightboard_service::{EnrichmentService, ManualRouteService, RouteResolver};
use flightboard_store::RouteStore;

use super::{create_router, AppState};

fn create_test_app() -> (Router, Arc<RouteStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(RouteStore::open(temp_dir.path().join("routes.json")));
    let provider: Arc<dyn RouteProvider> = Arc::new(DisabledProvider);
    let resolver = Arc::new(RouteResolver::new(
        Arc::clone(&store),
        provider,
        &EnrichmentConfig::default(),
    ));
    let state = Arc::new(AppState {
        enrichment: EnrichmentService::new(resolver),
        manual: ManualRouteService::new(Arc::clone(&store)),
    });
    (create_router(state), store, temp_dir)
}

async fn body_json(body: Body) -> serde_json::Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _store, _temp_dir) = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_add_route_then_list() {
    let (app, store, _temp_dir) = create_test_app();

    let request = json_request(
        "POST",
        "/api/routes",
        serde_json::json!({"flight_id": "DLH123", "origin": "FRA", "destination": "JFK"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["origin"], "FRA");
    assert_eq!(body["source"], "manual");

    let response = app
        .oneshot(Request::builder().uri("/api/routes").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response.into_body()).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);
    assert_eq!(listing[0]["flight_id"], "DLH123");

    assert_eq!(store.get("DLH123").unwrap().source, RouteSource::Manual);
}

#[tokio::test]
async fn test_add_route_validation_failure() {
    let (app, store, _temp_dir) = create_test_app();

    let request = json_request(
        "POST",
        "/api/routes",
        serde_json::json!({"flight_id": "DLH123", "origin": "", "destination": "JFK"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("origin"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_enrich_batch_attaches_known_routes() {
    let (app, store, _temp_dir) = create_test_app();
    store
        .put(RouteRecord::manual("DLH123".into(), "FRA".into(), "JFK".into()))
        .unwrap();

    let request = json_request(
        "POST",
        "/api/enrich",
        serde_json::json!([
            {"flight_id": "DLH123", "hardware_id": "3c6444", "latitude": 50.0, "longitude": 8.5,
             "altitude": 10000.0, "speed": 250.0, "timestamp": 1756000000},
            {"flight_id": "BAW456", "hardware_id": "400abc", "latitude": null, "longitude": null,
             "altitude": null, "speed": null, "timestamp": 1756000000}
        ]),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    let batch = body.as_array().unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0]["origin"], "FRA");
    assert_eq!(batch[0]["destination"], "JFK");
    assert!(batch[1]["origin"].is_null());
}
