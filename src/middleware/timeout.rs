use std::time::Duration;

use axum::{
  extract::{Request, State},
  http::StatusCode,
  middleware::Next,
  response::{IntoResponse, Response},
};

use crate::AppError;

/// Fails the request with 408 once `limit` has elapsed. The downstream future is dropped at
/// that point, which returns any pooled connection it had checked out.
pub async fn enforce_timeout(State(limit): State<Duration>, request: Request, next: Next) -> Response {
  let method = request.method().clone();
  let path = request.uri().path().to_owned();

  match tokio::time::timeout(limit, next.run(request)).await {
    Ok(response) => response,
    Err(_) => {
      tracing::warn!("{} {} timed out after {:?}", method, path, limit);
      AppError::new(
        StatusCode::REQUEST_TIMEOUT,
        "Request timeout",
        format!("Request did not complete within {} seconds", limit.as_secs()),
      )
      .into_response()
    }
  }
}
