use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::{Deserialize, Serialize};

use crate::domains::user::service::UserServiceError;

/// Body of every non-2xx response. `code` always mirrors the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiErrorBody {
  pub error: String,
  pub message: String,
  pub code: u16,
}

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub error: String,
  pub message: String,
}

impl AppError {
  pub fn new(status_code: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      status_code,
      error: error.into(),
      message: message.into(),
    }
  }

  pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, error, message)
  }

  pub fn unauthorized(error: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(StatusCode::UNAUTHORIZED, error, message)
  }

  pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, error, message)
  }

  pub fn conflict(error: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(StatusCode::CONFLICT, error, message)
  }

  pub fn internal_server_error() -> Self {
    Self::new(
      StatusCode::INTERNAL_SERVER_ERROR,
      "Internal server error",
      "An unexpected error occurred",
    )
  }

  pub fn body(&self) -> ApiErrorBody {
    ApiErrorBody {
      error: self.error.clone(),
      message: self.message.clone(),
      code: self.status_code.as_u16(),
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(self.body());
    (self.status_code, body).into_response()
  }
}

impl From<AppError> for StatusCode {
  fn from(err: AppError) -> Self {
    err.status_code
  }
}

impl From<JsonRejection> for AppError {
  fn from(rejection: JsonRejection) -> Self {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    AppError::bad_request("Invalid request body", rejection.body_text())
  }
}

impl From<UserServiceError> for AppError {
  fn from(error: UserServiceError) -> Self {
    match error {
      UserServiceError::ValidationError(msg) => AppError::bad_request("Invalid request", msg),
      UserServiceError::UserNotFound(msg) => AppError::not_found("User not found", msg),
      UserServiceError::Conflict(msg) => AppError::conflict("User already exists", msg),
      UserServiceError::Unauthorized(msg) => AppError::unauthorized("Invalid credentials", msg),
      UserServiceError::InternalServerError(detail) => {
        tracing::error!("Internal error: {}", detail);
        AppError::internal_server_error()
      }
    }
  }
}
