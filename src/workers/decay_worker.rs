// src/workers/decay_worker.rs

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::decay;
use crate::models::PassSummary;
use crate::store::PriorityStore;

/// Runs one decay-then-sweep pass over the property store.
///
/// A pass is a pure recomputation from absolute timestamps: it never needs
/// to know how many scheduled runs were missed, so a failed or skipped pass
/// self-corrects on the next wake.
pub struct DecayWorker<S: PriorityStore> {
    store: Arc<S>,
}

impl<S: PriorityStore> DecayWorker<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Execute a full pass: lower every in-window boost to its present-day
    /// level, then bulk-reset everything past expiry.
    pub async fn run_pass(&self, now: DateTime<Utc>) -> Result<PassSummary, WorkerError> {
        let boosts = self
            .store
            .find_active_boosts(now)
            .await
            .map_err(|e| WorkerError::DatabaseError(e.to_string()))?;

        let mut summary = PassSummary {
            scanned: boosts.len(),
            ..PassSummary::default()
        };

        for boost in boosts {
            let (Some(started_at), Some(expires_at)) =
                (boost.priority_started_at, boost.priority_expires_at)
            else {
                warn!("Skipping property {} with incomplete boost window", boost.id);
                summary.skipped_malformed += 1;
                continue;
            };

            let Some(new_level) =
                decay::decayed_level(boost.priority_level, started_at, expires_at, now)
            else {
                warn!(
                    "Skipping property {} with malformed boost window ({} - {})",
                    boost.id, started_at, expires_at
                );
                summary.skipped_malformed += 1;
                continue;
            };

            // Avoid negative or redundant writes
            if new_level >= boost.priority_level {
                continue;
            }

            let written = self
                .store
                .update_priority_level(boost.id, new_level, expires_at)
                .await
                .map_err(|e| WorkerError::DatabaseError(e.to_string()))?;

            if written {
                info!("Updated priority for property {} to {}", boost.id, new_level);
                summary.decayed += 1;
            } else {
                debug!(
                    "Boost window for property {} changed during pass, dropped stale write",
                    boost.id
                );
                summary.skipped_concurrent += 1;
            }
        }

        let expired_reset = self
            .store
            .clear_expired(now)
            .await
            .map_err(|e| WorkerError::DatabaseError(e.to_string()))?;

        if expired_reset > 0 {
            info!("Reset {} expired property priorities to 0", expired_reset);
        }
        summary.expired_reset = expired_reset;

        info!(
            "Priority decay pass completed: {} scanned, {} decayed, {} expired",
            summary.scanned, summary.decayed, summary.expired_reset
        );

        Ok(summary)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
