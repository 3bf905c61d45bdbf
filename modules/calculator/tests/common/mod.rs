#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for calculator integration tests

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use calculator::{CalculatorModule, CalculatorService, InMemoryInstanceStore};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub fn create_service() -> Arc<CalculatorService> {
    Arc::new(CalculatorService::new(Arc::new(InMemoryInstanceStore::new())))
}

pub fn create_router() -> Router {
    CalculatorModule::default().register_rest(Router::new())
}

/// Sends a request through `router` and returns the status and the JSON body.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    send_request(router, builder.body(body).unwrap()).await
}

/// Sends a raw body with a JSON content type.
pub async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    body: &'static str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    send_request(router, request).await
}

async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).expect("response body should be JSON");
    (status, json)
}

/// Reads the `id` field of a calculation response.
pub fn id_of(body: &Value) -> u64 {
    body["id"].as_u64().expect("response should carry a numeric id")
}
