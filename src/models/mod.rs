use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Boost state carried inline on a property listing.
///
/// A listing with `priority_level > 0` has an active paid boost; both
/// timestamps are set and `priority_started_at < priority_expires_at`.
/// A listing that has never been boosted, or whose boost has expired and
/// been swept, carries level 0 and NULL timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PropertyBoost {
    pub id: Uuid,
    pub priority_level: i32,
    pub priority_started_at: Option<DateTime<Utc>>,
    pub priority_expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Outcome of one decay-then-sweep pass, for operational logging.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    /// Boosted, unexpired properties inspected this pass.
    pub scanned: usize,
    /// Properties whose level was lowered and written back.
    pub decayed: usize,
    /// Properties skipped because their boost window was malformed.
    pub skipped_malformed: usize,
    /// Writes dropped because the boost window changed underneath us.
    pub skipped_concurrent: usize,
    /// Expired boosts reset to zero by the bulk sweep.
    pub expired_reset: u64,
}
