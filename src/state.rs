use std::sync::Arc;

use sqlx::PgPool;

use crate::{
  config::AppConfig,
  domains::user::{
    model::{CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, UserResponse},
    repository::{InMemoryUserRepository, SqlxUserRepository},
    service::{UserService, UserServiceError, UserServiceImpl},
  },
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn list_users(&self) -> impl std::future::Future<Output = Result<Vec<UserResponse>, UserServiceError>> + Send;
  fn get_user(&self, id: i32) -> impl std::future::Future<Output = Result<UserResponse, UserServiceError>> + Send;
  fn create_user(
    &self,
    req: CreateUserRequest,
  ) -> impl std::future::Future<Output = Result<UserResponse, UserServiceError>> + Send;
  fn update_user(
    &self,
    id: i32,
    req: UpdateUserRequest,
  ) -> impl std::future::Future<Output = Result<UserResponse, UserServiceError>> + Send;
  fn delete_user(&self, id: i32) -> impl std::future::Future<Output = Result<(), UserServiceError>> + Send;
  fn login(
    &self,
    req: LoginRequest,
  ) -> impl std::future::Future<Output = Result<LoginResponse, UserServiceError>> + Send;
  fn count_users(&self) -> impl std::future::Future<Output = Result<usize, UserServiceError>> + Send;
}

/// Handler-facing state: the user service plus the loaded configuration.
///
/// The store behind the service is chosen once at startup and injected here; no handler
/// reaches a store any other way.
#[derive(Clone)]
pub struct SharedAppState {
  pub user_service: Arc<dyn UserService>,
  pub config: Arc<AppConfig>,
}

impl SharedAppState {
  pub fn new(user_service: Arc<dyn UserService>, config: AppConfig) -> Self {
    Self {
      user_service,
      config: Arc::new(config),
    }
  }

  pub fn with_pool(pool: PgPool, config: AppConfig) -> Self {
    let user_repository = SqlxUserRepository::new(pool);
    Self::new(Arc::new(UserServiceImpl::new(user_repository)), config)
  }

  pub fn in_memory(config: AppConfig) -> Self {
    let user_repository = InMemoryUserRepository::new();
    Self::new(Arc::new(UserServiceImpl::new(user_repository)), config)
  }
}

impl AppState for SharedAppState {
  async fn list_users(&self) -> Result<Vec<UserResponse>, UserServiceError> {
    self.user_service.list_users().await
  }

  async fn get_user(&self, id: i32) -> Result<UserResponse, UserServiceError> {
    self.user_service.get_user(id).await
  }

  async fn create_user(&self, req: CreateUserRequest) -> Result<UserResponse, UserServiceError> {
    self.user_service.create_user(req).await
  }

  async fn update_user(&self, id: i32, req: UpdateUserRequest) -> Result<UserResponse, UserServiceError> {
    self.user_service.update_user(id, req).await
  }

  async fn delete_user(&self, id: i32) -> Result<(), UserServiceError> {
    self.user_service.delete_user(id).await
  }

  async fn login(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError> {
    self.user_service.login(req).await
  }

  async fn count_users(&self) -> Result<usize, UserServiceError> {
    self.user_service.count_users().await
  }
}
