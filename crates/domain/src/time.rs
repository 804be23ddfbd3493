//! Timestamps for draft bookkeeping and schedules.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `created_at`, `updated_at` and `scheduled_at`.
pub type Timestamp = DateTime<Utc>;

/// Current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
