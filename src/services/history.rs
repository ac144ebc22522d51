use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use crate::core::capabilities::{CapabilityError, SearchHistorySink};
use crate::models::SearchRecord;

/// Errors that can occur when writing search history
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// PostgreSQL sink for search history
///
/// Write-only and best-effort: the pipeline fires history writes without
/// awaiting them, and a failed write never affects a search response. The
/// data feeds analytics and the popular-query list offline.
pub struct HistoryStore {
    pool: PgPool,
}

impl HistoryStore {
    /// Create a new history store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, HistoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create from settings, filling in pool defaults
    pub async fn from_settings(
        database_url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, HistoryError> {
        Self::new(
            database_url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
            idle_timeout_secs.unwrap_or(600),
        )
        .await
    }

    /// Insert one search record
    pub async fn insert_record(&self, record: &SearchRecord) -> Result<(), HistoryError> {
        let params = serde_json::to_value(&record.params)?;

        sqlx::query(
            r#"
            INSERT INTO search_history (id, query, result_count, params, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(&record.query)
        .bind(record.result_count as i64)
        .bind(params)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Check database connectivity
    pub async fn health_check(&self) -> Result<bool, HistoryError> {
        let row: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await?;
        Ok(row.0 == 1)
    }
}

#[async_trait]
impl SearchHistorySink for HistoryStore {
    async fn record_search(&self, record: &SearchRecord) -> Result<(), CapabilityError> {
        self.insert_record(record)
            .await
            .map_err(|e| CapabilityError::Unavailable(e.to_string()))
    }
}
