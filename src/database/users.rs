use chrono::{Timelike, Utc};
use sqlx::SqlitePool;

use super::models::User;
use super::DatabaseError;

/// Role assigned to self-registered accounts.
pub const DEFAULT_ROLE: &str = "USER";

/// Persistence for user records. Logins are unique and case-sensitive.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, login, password_hash, role, created_at FROM users WHERE login = ?",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a new user with the default role and a second-precision
    /// creation timestamp.
    pub async fn create(&self, login: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let now = Utc::now();
        let created_at = now.with_nanosecond(0).unwrap_or(now);

        let result =
            sqlx::query("INSERT INTO users (login, password_hash, role, created_at) VALUES (?, ?, ?, ?)")
                .bind(login)
                .bind(password_hash)
                .bind(DEFAULT_ROLE)
                .bind(created_at)
                .execute(&self.pool)
                .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            login: login.to_string(),
            password_hash: password_hash.to_string(),
            role: DEFAULT_ROLE.to_string(),
            created_at,
        })
    }
}
