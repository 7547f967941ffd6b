//! SQLite Store
//!
//! sqlx-backed implementation of the store capability.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::db::UserStore;
use crate::error::StoreError;
use crate::models::User;

// == Database ==
/// The process-wide store handle: a SQLite connection pool.
///
/// Created once at startup via [`connect_with_retry`](crate::db::connect_with_retry)
/// and owned for the process lifetime.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    // == Open ==
    /// Opens a pool against `url`, probes liveness, and applies the schema.
    ///
    /// One attempt of the bounded-retry startup sequence; any failure here is
    /// retried by the caller.
    pub async fn open(url: &str) -> Result<Self, sqlx::Error> {
        // One pooled connection: SQLite serializes writes anyway, and it keeps
        // in-memory databases visible across acquires
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;

        // Liveness probe before declaring the handle usable
        sqlx::query("SELECT 1").execute(&pool).await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    // == Migrate ==
    /// Creates the schema if it does not exist yet. Idempotent.
    async fn migrate(&self) -> Result<(), sqlx::Error> {
        debug!("applying schema migration");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// == Store Capability Implementation ==
#[async_trait]
impl UserStore for Database {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>("SELECT id, name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn insert(&self, name: &str) -> Result<User, StoreError> {
        let row = sqlx::query("INSERT INTO users (name) VALUES (?) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(User {
            id: row.get("id"),
            name: name.to_string(),
        })
    }

    async fn fetch(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update(&self, id: i64, name: &str) -> Result<Option<User>, StoreError> {
        let result = sqlx::query("UPDATE users SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        // The affected-row count is the sole existence check
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(User {
            id,
            name: name.to_string(),
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
