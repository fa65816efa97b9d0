use axum::{
  extract::{Request, State},
  middleware::Next,
  response::Response,
};

use crate::{state::SharedAppState, AppError};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Static shared-secret guard for admin routes. This is not tied to login tokens.
pub async fn require_api_key(
  State(state): State<SharedAppState>,
  request: Request,
  next: Next,
) -> Result<Response, AppError> {
  let provided = request.headers().get(API_KEY_HEADER).and_then(|v| v.to_str().ok());

  match provided {
    Some(key) if key == state.config.api_key => Ok(next.run(request).await),
    Some(_) => {
      tracing::warn!("Rejected request with invalid API key");
      Err(AppError::unauthorized("Unauthorized", "Invalid API key"))
    }
    None => Err(AppError::unauthorized("Unauthorized", "Missing X-API-Key header")),
  }
}
