use axum::{
  extract::State,
  http::{Method, StatusCode, Uri},
  middleware::{from_fn, from_fn_with_state},
  response::Json as JsonResponse,
  routing::get,
  Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;

use crate::{
  domains::user::rest::user_routes,
  middleware::{auth::require_api_key, cors, logging, timeout::enforce_timeout},
  state::{AppState, SharedAppState},
  AppError,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
  pub status: String,
  pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsResponse {
  pub total_users: usize,
}

pub fn create_app(state: SharedAppState) -> Router {
  let request_timeout = state.config.request_timeout;

  let admin_routes = Router::new()
    .route("/admin/stats", get(stats_handler))
    .route_layer(from_fn_with_state(state.clone(), require_api_key));

  Router::new()
    .route("/health", get(health_handler))
    .nest("/api", user_routes().merge(admin_routes))
    .fallback(route_not_found)
    .method_not_allowed_fallback(method_not_allowed)
    // Outermost first: logging, CORS, preflight short-circuit, deadline.
    .layer(
      ServiceBuilder::new()
        .layer(logging::trace_layer())
        .layer(cors::cors_layer())
        .layer(from_fn(cors::short_circuit_options))
        .layer(from_fn_with_state(request_timeout, enforce_timeout)),
    )
    .with_state(state)
}

pub async fn health_handler() -> JsonResponse<HealthResponse> {
  JsonResponse(HealthResponse {
    status: "ok".to_string(),
    timestamp: Utc::now(),
  })
}

pub async fn stats_handler(State(state): State<SharedAppState>) -> Result<JsonResponse<StatsResponse>, AppError> {
  let total_users = state.count_users().await?;
  Ok(JsonResponse(StatsResponse { total_users }))
}

async fn route_not_found(method: Method, uri: Uri) -> AppError {
  AppError::not_found("Not found", format!("No route for {} {}", method, uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
  AppError::new(
    StatusCode::METHOD_NOT_ALLOWED,
    "Method not allowed",
    format!("{} is not supported on {}", method, uri.path()),
  )
}
