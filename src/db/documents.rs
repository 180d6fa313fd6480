//! Document store client.
//!
//! Documents are addressed by `(collection, key)` and always read and written
//! whole. The single-statement upsert is the only atomicity primitive: it
//! protects one write against store-level corruption, not two interleaved
//! read-modify-write cycles.

use chrono::Utc;
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;

/// Collection holding one document per platform, keyed by platform name.
pub const PLATFORMS_COLLECTION: &str = "platforms";

/// Collection holding one document per user, keyed by email.
pub const USERS_COLLECTION: &str = "users";

/// Key-value document database client.
#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch a whole document. `None` when the key was never written.
    pub async fn get_document(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Value>, AppError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND doc_key = ?")
            .bind(collection)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let body: String = row.get("body");
                let value = serde_json::from_str(&body).map_err(|e| {
                    AppError::Store(format!("Corrupt document {}/{}: {}", collection, key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Replace a whole document image.
    pub async fn set_document(
        &self,
        collection: &str,
        key: &str,
        body: &Value,
    ) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        let body = serde_json::to_string(body)
            .map_err(|e| AppError::Internal(format!("Unserializable document: {}", e)))?;

        sqlx::query(
            r#"INSERT INTO documents (collection, doc_key, body, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (collection, doc_key)
               DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at"#,
        )
        .bind(collection)
        .bind(key)
        .bind(&body)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
