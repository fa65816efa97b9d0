use axum::{
  body::{Body, Bytes},
  http::{HeaderMap, Method, Request, StatusCode},
  Router,
};
use serde::Serialize;
use tower::ServiceExt;

use crate::{app::create_app, config::AppConfig, state::SharedAppState};

pub fn app_with_memory_store() -> Router {
  let state = SharedAppState::in_memory(AppConfig::default());
  create_app(state)
}

async fn dispatch(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let headers = response.headers().clone();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, headers, body)
}

pub async fn send(app: Router, method: Method, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, HeaderMap, Bytes) {
  let mut builder = Request::builder().method(method).uri(uri);
  for (name, value) in headers {
    builder = builder.header(*name, *value);
  }
  let request = builder.body(Body::empty()).expect("build request");
  dispatch(app, request).await
}

pub async fn send_raw(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method(method)
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(body.to_owned()))
    .expect("build request");

  let (status, _, body) = dispatch(app, request).await;
  (status, body)
}

async fn send_json<T: Serialize>(app: Router, method: &str, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let body = serde_json::to_string(body).expect("serialize request body");
  send_raw(app, method, uri, &body).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  let (status, _, body) = send(app, Method::GET, uri, &[]).await;
  (status, body)
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, Bytes) {
  let (status, _, body) = send(app, Method::DELETE, uri, &[]).await;
  (status, body)
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  send_json(app, "POST", uri, body).await
}

pub async fn put_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  send_json(app, "PUT", uri, body).await
}
