use axum::{
  extract::State,
  http::StatusCode,
  response::Json as JsonResponse,
  routing::{get, post},
  Router,
};

use super::model::{CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, UserResponse};
use crate::{
  state::{AppState, SharedAppState},
  utils::extract::{ApiJson, UserId},
  AppError,
};

pub fn user_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/users", get(list_users_handler).post(create_user_handler))
    .route(
      "/users/{id}",
      get(get_user_handler).put(update_user_handler).delete(delete_user_handler),
    )
    .route("/auth/login", post(login_handler))
}

pub async fn list_users_handler(
  State(state): State<SharedAppState>,
) -> Result<JsonResponse<Vec<UserResponse>>, AppError> {
  state.list_users().await.map(JsonResponse).map_err(Into::into)
}

pub async fn get_user_handler(
  State(state): State<SharedAppState>,
  UserId(id): UserId,
) -> Result<JsonResponse<UserResponse>, AppError> {
  state.get_user(id).await.map(JsonResponse).map_err(Into::into)
}

pub async fn create_user_handler(
  State(state): State<SharedAppState>,
  ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, JsonResponse<UserResponse>), AppError> {
  let user = state.create_user(payload).await?;
  Ok((StatusCode::CREATED, JsonResponse(user)))
}

pub async fn update_user_handler(
  State(state): State<SharedAppState>,
  UserId(id): UserId,
  ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<JsonResponse<UserResponse>, AppError> {
  state.update_user(id, payload).await.map(JsonResponse).map_err(Into::into)
}

pub async fn delete_user_handler(
  State(state): State<SharedAppState>,
  UserId(id): UserId,
) -> Result<StatusCode, AppError> {
  state.delete_user(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

pub async fn login_handler(
  State(state): State<SharedAppState>,
  ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<JsonResponse<LoginResponse>, AppError> {
  state.login(payload).await.map(JsonResponse).map_err(Into::into)
}
