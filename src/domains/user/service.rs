use async_trait::async_trait;
use chrono::Utc;
use std::error::Error;
use validator::Validate;

use super::{
  model::{CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, UserResponse},
  repository::{RepositoryError, UserRepository},
};
use crate::utils::token::issue_token;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug)]
pub enum UserServiceError {
  Unauthorized(String),
  ValidationError(String),
  UserNotFound(String),
  Conflict(String),
  InternalServerError(String),
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
      UserServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      UserServiceError::UserNotFound(msg) => write!(f, "User Not Found: {}", msg),
      UserServiceError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      UserServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl From<RepositoryError> for UserServiceError {
  fn from(err: RepositoryError) -> Self {
    match err {
      RepositoryError::NotFound => UserServiceError::UserNotFound("User not found".to_string()),
      RepositoryError::Conflict(msg) => UserServiceError::Conflict(msg),
      RepositoryError::DatabaseError(e) => UserServiceError::InternalServerError(format!("Database error: {}", e)),
    }
  }
}

fn not_found(id: i32) -> UserServiceError {
  UserServiceError::UserNotFound(format!("User with id {} does not exist", id))
}

#[async_trait]
pub trait UserService: Send + Sync {
  async fn list_users(&self) -> Result<Vec<UserResponse>, UserServiceError>;
  async fn get_user(&self, id: i32) -> Result<UserResponse, UserServiceError>;
  async fn create_user(&self, req: CreateUserRequest) -> Result<UserResponse, UserServiceError>;
  async fn update_user(&self, id: i32, req: UpdateUserRequest) -> Result<UserResponse, UserServiceError>;
  async fn delete_user(&self, id: i32) -> Result<(), UserServiceError>;
  async fn login(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError>;
  async fn count_users(&self) -> Result<usize, UserServiceError>;
}

pub struct UserServiceImpl<U> {
  user_repository: U,
}

impl<U> UserServiceImpl<U>
where
  U: UserRepository,
{
  pub fn new(user_repository: U) -> Self {
    Self { user_repository }
  }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
  U: UserRepository,
{
  async fn list_users(&self) -> Result<Vec<UserResponse>, UserServiceError> {
    let users = self.user_repository.get_all().await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
  }

  async fn get_user(&self, id: i32) -> Result<UserResponse, UserServiceError> {
    match self.user_repository.get_by_id(id).await {
      Ok(user) => Ok(user.into()),
      Err(RepositoryError::NotFound) => Err(not_found(id)),
      Err(e) => Err(e.into()),
    }
  }

  async fn create_user(&self, req: CreateUserRequest) -> Result<UserResponse, UserServiceError> {
    req
      .validate()
      .map_err(|_| UserServiceError::ValidationError("Username, email, and password are required".to_string()))?;

    let user = self
      .user_repository
      .create(&req.username, &req.email, &req.password)
      .await?;

    tracing::info!("Created user {} ({})", user.id, user.username);
    Ok(user.into())
  }

  async fn update_user(&self, id: i32, req: UpdateUserRequest) -> Result<UserResponse, UserServiceError> {
    let mut user = match self.user_repository.get_by_id(id).await {
      Ok(user) => user,
      Err(RepositoryError::NotFound) => return Err(not_found(id)),
      Err(e) => return Err(e.into()),
    };

    req.apply_to(&mut user);

    let user = match self.user_repository.update(&user).await {
      Ok(user) => user,
      Err(RepositoryError::NotFound) => return Err(not_found(id)),
      Err(e) => return Err(e.into()),
    };

    tracing::info!("Updated user {}", user.id);
    Ok(user.into())
  }

  async fn delete_user(&self, id: i32) -> Result<(), UserServiceError> {
    match self.user_repository.delete(id).await {
      Ok(()) => {
        tracing::info!("Deleted user {}", id);
        Ok(())
      }
      Err(RepositoryError::NotFound) => Err(not_found(id)),
      Err(e) => Err(e.into()),
    }
  }

  async fn login(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError> {
    req
      .validate()
      .map_err(|_| UserServiceError::ValidationError("Username and password are required".to_string()))?;

    let user = match self.user_repository.get_by_username(&req.username).await {
      Ok(user) => user,
      Err(RepositoryError::NotFound) => return Err(UserServiceError::Unauthorized(INVALID_CREDENTIALS.to_string())),
      Err(e) => return Err(e.into()),
    };

    if user.password != req.password {
      return Err(UserServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = issue_token(user.id, Utc::now());
    tracing::info!("User {} logged in", user.id);

    Ok(LoginResponse {
      token,
      user: user.into(),
    })
  }

  async fn count_users(&self) -> Result<usize, UserServiceError> {
    Ok(self.user_repository.get_all().await?.len())
  }
}
