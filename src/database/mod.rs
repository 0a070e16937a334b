pub mod models;
pub mod products;
pub mod users;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

pub use models::{NewProduct, Product, ProductPatch, User};
pub use products::ProductStore;
pub use users::UserStore;

/// Errors from the store layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return DatabaseError::UniqueViolation(db_err.message().to_string());
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Open the connection pool and bootstrap the schema.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    init_schema(&pool).await?;
    info!("database ready at {}", config.url);
    Ok(pool)
}

/// Create the tables if they are missing. Real migration tooling is out of
/// scope; the schema is small enough to bootstrap in place. The UNIQUE
/// constraints back the pre-write existence checks in the handlers, so a
/// race between check and insert still cannot produce duplicates.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            login TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'USER',
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS produkty (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nazwa TEXT NOT NULL UNIQUE,
            cena REAL NOT NULL,
            kategoria TEXT NOT NULL,
            ilosc INTEGER NOT NULL,
            producent TEXT,
            data_dodania TEXT
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
