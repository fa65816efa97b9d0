use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Issues an opaque bearer token bound to a user id and the issuance time.
///
/// Tokens are not stored server-side and nothing verifies them; they only identify
/// the login event to the client.
pub fn issue_token(user_id: i32, issued_at: DateTime<Utc>) -> String {
  let mut hasher = Sha256::new();
  hasher.update(format!("{}:{}:{}", user_id, issued_at.timestamp_micros(), Uuid::new_v4()).as_bytes());
  let result = hasher.finalize();
  format!("{:x}", result)
}
