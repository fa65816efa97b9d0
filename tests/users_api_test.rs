use axum::{
  body::Body,
  http::{Request, StatusCode},
  Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use user_api::{
  app::create_app,
  config::AppConfig,
  domains::user::model::{LoginResponse, UserResponse},
  state::SharedAppState,
};

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
  let request = Request::builder()
    .method(method)
    .uri(uri)
    .header("content-type", "application/json")
    .body(match body {
      Some(value) => Body::from(serde_json::to_vec(&value).unwrap()),
      None => Body::empty(),
    })
    .unwrap();

  let response = app.clone().oneshot(request).await.unwrap();
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
  (status, body.to_vec())
}

#[tokio::test]
async fn test_user_lifecycle() {
  let app = create_app(SharedAppState::in_memory(AppConfig::default()));

  let (status, body) = call(&app, "GET", "/api/users", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));

  let (status, body) = call(
    &app,
    "POST",
    "/api/users",
    Some(json!({"username": "john", "email": "john@example.com", "password": "secret"})),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let created: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(created["id"], 1);
  assert!(created.get("password").is_none());

  let (status, body) = call(
    &app,
    "POST",
    "/api/users",
    Some(json!({"username": "jane", "email": "jane@example.com", "password": "hunter2"})),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let jane: UserResponse = serde_json::from_slice(&body).unwrap();

  let (_, body) = call(&app, "GET", "/api/users", None).await;
  let users: Vec<UserResponse> = serde_json::from_slice(&body).unwrap();
  assert_eq!(users.len(), 2);
  assert_eq!(users[0].id, jane.id);

  let (status, body) = call(
    &app,
    "POST",
    "/api/auth/login",
    Some(json!({"username": "john", "password": "secret"})),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let login: LoginResponse = serde_json::from_slice(&body).unwrap();
  assert!(!login.token.is_empty());
  assert_eq!(login.user.username, "john");

  let (status, body) = call(
    &app,
    "POST",
    "/api/auth/login",
    Some(json!({"username": "john", "password": "wrong"})),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  let error: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(error["error"], "Invalid credentials");
  assert_eq!(error["code"], 401);

  let (status, body) = call(&app, "PUT", "/api/users/1", Some(json!({"email": "john@new.example.com"}))).await;
  assert_eq!(status, StatusCode::OK);
  let updated: UserResponse = serde_json::from_slice(&body).unwrap();
  assert_eq!(updated.username, "john");
  assert_eq!(updated.email, "john@new.example.com");

  let (status, _) = call(&app, "PUT", "/api/users/2", Some(json!({"username": "john"}))).await;
  assert_eq!(status, StatusCode::CONFLICT);

  let (status, body) = call(&app, "DELETE", "/api/users/1", None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert!(body.is_empty());

  let (status, _) = call(&app, "GET", "/api/users/1", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_creates_keep_usernames_unique() {
  let app = create_app(SharedAppState::in_memory(AppConfig::default()));

  let mut handles = Vec::new();
  for i in 0..10 {
    let app = app.clone();
    handles.push(tokio::spawn(async move {
      let body = json!({"username": "racer", "email": format!("racer{}@example.com", i), "password": "pw"});
      call(&app, "POST", "/api/users", Some(body)).await.0
    }));
  }

  let mut created = 0;
  for handle in handles {
    match handle.await.unwrap() {
      StatusCode::CREATED => created += 1,
      status => assert_eq!(status, StatusCode::CONFLICT),
    }
  }
  assert_eq!(created, 1);

  let (_, body) = call(&app, "GET", "/api/users", None).await;
  let users: Vec<UserResponse> = serde_json::from_slice(&body).unwrap();
  assert_eq!(users.len(), 1);
}
