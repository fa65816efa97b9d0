use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Stored user record. Carries the password, so it is intentionally not `Serialize`;
/// convert to [`UserResponse`] before it leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
  pub id: i32,
  pub username: String,
  pub email: String,
  pub password: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserResponse {
  pub id: i32,
  pub username: String,
  pub email: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      username: user.username,
      email: user.email,
      created_at: user.created_at,
      updated_at: user.updated_at,
    }
  }
}

// Missing fields default to "" so absent and empty values fail validation the same way.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CreateUserRequest {
  #[serde(default)]
  #[validate(length(min = 1))]
  pub username: String,
  #[serde(default)]
  #[validate(length(min = 1))]
  pub email: String,
  #[serde(default)]
  #[validate(length(min = 1))]
  pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateUserRequest {
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
}

impl UpdateUserRequest {
  /// Overwrites only the fields that were supplied with a non-empty value.
  pub fn apply_to(&self, user: &mut User) {
    if let Some(username) = self.username.as_deref().filter(|s| !s.is_empty()) {
      user.username = username.to_string();
    }
    if let Some(email) = self.email.as_deref().filter(|s| !s.is_empty()) {
      user.email = email.to_string();
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
  #[serde(default)]
  #[validate(length(min = 1))]
  pub username: String,
  #[serde(default)]
  #[validate(length(min = 1))]
  pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
  pub token: String,
  pub user: UserResponse,
}
