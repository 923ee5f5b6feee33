use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Credential record owned by the auth service. Deliberately not
/// `Serialize`: the hash must never reach a response body.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
