use axum::{
  extract::{FromRequest, FromRequestParts, Path},
  http::request::Parts,
};

use super::error::AppError;

/// `axum::Json` whose rejection is rendered as an [`AppError`] envelope instead of plain text.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Positive integer user id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

impl UserId {
  pub fn parse(raw: &str) -> Result<Self, AppError> {
    match raw.parse::<i32>() {
      Ok(id) if id > 0 => Ok(UserId(id)),
      _ => Err(AppError::bad_request(
        "Invalid user ID",
        format!("'{}' is not a valid user ID", raw),
      )),
    }
  }
}

impl<S> FromRequestParts<S> for UserId
where
  S: Send + Sync,
{
  type Rejection = AppError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
      .await
      .map_err(|_| AppError::bad_request("Invalid user ID", "User ID is missing from the path"))?;

    UserId::parse(&raw)
  }
}
