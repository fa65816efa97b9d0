use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;

use super::model::User;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
  #[error("user not found")]
  NotFound,
  #[error("{0}")]
  Conflict(String),
  #[error("database error: {0}")]
  DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(err: sqlx::Error) -> Self {
    if let sqlx::Error::Database(db_err) = &err {
      if db_err.is_unique_violation() {
        let field = match db_err.constraint() {
          Some("users_username_key") => "username",
          Some("users_email_key") => "email",
          _ => "username or email",
        };
        return RepositoryError::Conflict(conflict_message(field));
      }
    }
    RepositoryError::DatabaseError(err)
  }
}

fn conflict_message(field: &str) -> String {
  format!("A user with this {} already exists", field)
}

/// Persistence boundary for user records.
///
/// Every lookup that finds nothing fails with [`RepositoryError::NotFound`]; uniqueness
/// violations on `username` or `email` fail with [`RepositoryError::Conflict`].
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// All users, newest first.
  async fn get_all(&self) -> Result<Vec<User>, RepositoryError>;
  async fn get_by_id(&self, id: i32) -> Result<User, RepositoryError>;
  /// Case-sensitive exact match.
  async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError>;
  async fn create(&self, username: &str, email: &str, password: &str) -> Result<User, RepositoryError>;
  /// Persists `username` and `email` of an existing user and refreshes `updated_at`.
  async fn update(&self, user: &User) -> Result<User, RepositoryError>;
  async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

pub struct SqlxUserRepository {
  pub pool: PgPool,
}

impl SqlxUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
    let users = sqlx::query_as::<_, User>(
      r#"
        SELECT id, username, email, password, created_at, updated_at
        FROM users
        ORDER BY created_at DESC, id DESC
      "#,
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(users)
  }

  async fn get_by_id(&self, id: i32) -> Result<User, RepositoryError> {
    sqlx::query_as::<_, User>(
      r#"SELECT id, username, email, password, created_at, updated_at FROM users WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?
    .ok_or(RepositoryError::NotFound)
  }

  async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError> {
    sqlx::query_as::<_, User>(
      r#"SELECT id, username, email, password, created_at, updated_at FROM users WHERE username = $1"#,
    )
    .bind(username)
    .fetch_optional(&self.pool)
    .await?
    .ok_or(RepositoryError::NotFound)
  }

  async fn create(&self, username: &str, email: &str, password: &str) -> Result<User, RepositoryError> {
    let user = sqlx::query_as::<_, User>(
      r#"
        INSERT INTO users (username, email, password, created_at, updated_at)
        VALUES ($1, $2, $3, NOW(), NOW())
        RETURNING id, username, email, password, created_at, updated_at
      "#,
    )
    .bind(username)
    .bind(email)
    .bind(password)
    .fetch_one(&self.pool)
    .await?;

    Ok(user)
  }

  async fn update(&self, user: &User) -> Result<User, RepositoryError> {
    sqlx::query_as::<_, User>(
      r#"
        UPDATE users
        SET username = $1, email = $2, updated_at = NOW()
        WHERE id = $3
        RETURNING id, username, email, password, created_at, updated_at
      "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(user.id)
    .fetch_optional(&self.pool)
    .await?
    .ok_or(RepositoryError::NotFound)
  }

  async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RepositoryError::NotFound);
    }

    Ok(())
  }
}

#[derive(Default)]
struct MemoryTable {
  last_id: i32,
  rows: BTreeMap<i32, User>,
}

impl MemoryTable {
  fn check_unique(&self, username: &str, email: &str, except_id: Option<i32>) -> Result<(), RepositoryError> {
    for user in self.rows.values().filter(|u| Some(u.id) != except_id) {
      if user.username == username {
        return Err(RepositoryError::Conflict(conflict_message("username")));
      }
      if user.email == email {
        return Err(RepositoryError::Conflict(conflict_message("email")));
      }
    }
    Ok(())
  }
}

/// Non-persistent store with the same contract as [`SqlxUserRepository`].
#[derive(Default)]
pub struct InMemoryUserRepository {
  table: RwLock<MemoryTable>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
    let table = self.table.read().await;
    let mut users: Vec<User> = table.rows.values().cloned().collect();
    users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(users)
  }

  async fn get_by_id(&self, id: i32) -> Result<User, RepositoryError> {
    let table = self.table.read().await;
    table.rows.get(&id).cloned().ok_or(RepositoryError::NotFound)
  }

  async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError> {
    let table = self.table.read().await;
    table
      .rows
      .values()
      .find(|u| u.username == username)
      .cloned()
      .ok_or(RepositoryError::NotFound)
  }

  async fn create(&self, username: &str, email: &str, password: &str) -> Result<User, RepositoryError> {
    let mut table = self.table.write().await;
    table.check_unique(username, email, None)?;

    table.last_id += 1;
    let now = Utc::now();
    let user = User {
      id: table.last_id,
      username: username.to_string(),
      email: email.to_string(),
      password: password.to_string(),
      created_at: now,
      updated_at: now,
    };
    table.rows.insert(user.id, user.clone());

    Ok(user)
  }

  async fn update(&self, user: &User) -> Result<User, RepositoryError> {
    let mut table = self.table.write().await;
    if !table.rows.contains_key(&user.id) {
      return Err(RepositoryError::NotFound);
    }
    table.check_unique(&user.username, &user.email, Some(user.id))?;

    let stored = table.rows.get_mut(&user.id).ok_or(RepositoryError::NotFound)?;
    stored.username = user.username.clone();
    stored.email = user.email.clone();
    stored.updated_at = Utc::now();

    Ok(stored.clone())
  }

  async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
    let mut table = self.table.write().await;
    table.rows.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
  }
}
