#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::FixedOffset;
use school_admin::{app, AppState, MemoryDocumentStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn make_test_app() -> Router {
    let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
    let state = AppState::new(Arc::new(MemoryDocumentStore::new()), offset);
    app(state, 64 * 1024)
}

/// Send one request and decode the JSON response body (Null when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, json)
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Create a record and return its generated id.
pub async fn create_id(app: &Router, prefix: &str, body: Value) -> String {
    let (status, json) = post(app, &format!("{}/add", prefix), body).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
    json["id"].as_str().expect("created record has an id").to_string()
}
