//! Shared helpers: build the router over a [`MemoryStore`] and drive it with `oneshot`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use cadastro_api::{app, AppState, MemoryStore, Store};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 64 * 1024;

pub fn memory_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    (app(AppState::new(store.clone()), BODY_LIMIT), store)
}

pub fn app_with<S: Store + 'static>(store: S) -> Router {
    app(AppState::new(store), BODY_LIMIT)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Create `n` users through the API; ids come back as 1..=n.
pub async fn seed_users(app: &Router, n: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let (status, body) = post(
            app,
            "/users",
            json!({ "nome": format!("Usuário {}", i + 1), "email": format!("u{}@example.com", i + 1) }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        ids.push(body["user"]["id"].as_i64().unwrap());
    }
    ids
}

pub fn card_body(dt_expiracao: &str) -> Value {
    json!({
        "numero": "4000123456789010",
        "dtExpiracao": dt_expiracao,
        "cvv": "123",
        "saldo": 5000
    })
}
