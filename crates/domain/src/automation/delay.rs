//! Delay between a trigger firing and the follow-up being sent.

use std::num::NonZeroU32;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Unit applied to a rule's `wait_days` magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    #[default]
    Days,
}

impl TimeUnit {
    fn seconds(self) -> u64 {
        match self {
            Self::Minutes => 60,
            Self::Hours => 60 * 60,
            Self::Days => 24 * 60 * 60,
        }
    }

    /// Length of `amount` units.
    #[must_use]
    pub fn duration(self, amount: NonZeroU32) -> Duration {
        Duration::from_secs(u64::from(amount.get()) * self.seconds())
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minutes => f.write_str("minutes"),
            Self::Hours => f.write_str("hours"),
            Self::Days => f.write_str("days"),
        }
    }
}
