use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::PropertyBoost;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Persistence operations the decay pass needs from the property store.
///
/// The decay worker only ever talks to this trait, so pass semantics are
/// testable against an in-memory store without a database fixture.
#[async_trait]
pub trait PriorityStore: Send + Sync {
    /// Properties holding a boost that has not yet expired: level above zero
    /// and a fully populated window with `priority_expires_at > now`.
    async fn find_active_boosts(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<PropertyBoost>, StoreError>;

    /// Lower a single property's level. The write is conditional on the
    /// boost window still ending at `expected_expires_at`; if a concurrent
    /// purchase moved the window, the stale write is dropped and `false`
    /// is returned.
    async fn update_priority_level(
        &self,
        id: Uuid,
        new_level: i32,
        expected_expires_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// Bulk sweep: every property past its expiry with a nonzero level gets
    /// level 0 and NULL timestamps. Returns the number of rows reset.
    async fn clear_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;
}

pub struct PgPriorityStore {
    pool: PgPool,
}

impl PgPriorityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriorityStore for PgPriorityStore {
    async fn find_active_boosts(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<PropertyBoost>, StoreError> {
        let boosts = sqlx::query_as::<_, PropertyBoost>(
            r#"
            SELECT id, priority_level, priority_started_at, priority_expires_at, is_active
            FROM properties
            WHERE priority_level > 0
              AND priority_started_at IS NOT NULL
              AND priority_expires_at IS NOT NULL
              AND priority_expires_at > $1
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(boosts)
    }

    async fn update_priority_level(
        &self,
        id: Uuid,
        new_level: i32,
        expected_expires_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET priority_level = $1, updated_at = NOW()
            WHERE id = $2
              AND priority_expires_at = $3
              AND priority_level > $1
            "#,
        )
        .bind(new_level)
        .bind(id)
        .bind(expected_expires_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET priority_level = 0,
                priority_started_at = NULL,
                priority_expires_at = NULL,
                updated_at = NOW()
            WHERE priority_expires_at < $1
              AND priority_level > 0
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
