use axum::{
  extract::Request,
  http::{Method, StatusCode},
  middleware::Next,
  response::{IntoResponse, Response},
};
use tower_http::cors::{Any, CorsLayer};

/// Permissive cross-origin headers on every response.
pub fn cors_layer() -> CorsLayer {
  CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

/// Answers any `OPTIONS` request with an empty 200 before routing, so preflights never reach
/// route guards or return 405.
pub async fn short_circuit_options(request: Request, next: Next) -> Response {
  if request.method() == Method::OPTIONS {
    return StatusCode::OK.into_response();
  }

  next.run(request).await
}
