#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use local_service_connect::{create_app, AppState, Settings};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const BOUNDARY: &str = "lsc-test-boundary";

/// Settings with the simulated round trips switched off
pub fn fast_settings() -> Settings {
    Settings {
        simulated_latency: Duration::ZERO,
        ..Settings::default()
    }
}

pub fn test_app(settings: Settings) -> (Router, Arc<AppState>) {
    let state = AppState::with_mock_backends(settings);
    (create_app(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    send(app, Request::get(uri).body(Body::empty())?).await
}

pub async fn call(app: &Router, method: Method, uri: &str) -> Result<(StatusCode, Value)> {
    send(app, Request::builder().method(method).uri(uri).body(Body::empty())?).await
}

pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Value,
) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?;
    send(app, request).await
}

/// Single-file multipart body under the `image` field
pub fn multipart_image(file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn upload_avatar(
    app: &Router,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Result<(StatusCode, Value)> {
    let request = Request::post("/profile/avatar")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_image(file_name, content_type, bytes)))?;
    send(app, request).await
}

pub fn names(view: &Value) -> Vec<String> {
    view["data"]["professionals"]
        .as_array()
        .map(|cards| {
            cards
                .iter()
                .filter_map(|c| c["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
