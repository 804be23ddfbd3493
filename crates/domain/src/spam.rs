//! Spam check: the request sent for classification and the verdict returned.

use serde::{Deserialize, Deserializer, Serialize};

/// Reason reported when the classifier's reply could not be interpreted.
pub const UNANALYZABLE_REASON: &str = "Unable to properly analyze content";

/// Subject and body of a message to classify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpamCheckRequest {
    pub subject: String,
    pub content: String,
}

impl SpamCheckRequest {
    #[must_use]
    pub fn new(subject: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            content: content.into(),
        }
    }
}

/// Normalized classification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamVerdict {
    pub is_spam: bool,
    /// Percentage in `0..=100`.
    #[serde(default, deserialize_with = "confidence")]
    pub confidence: u8,
    #[serde(default)]
    pub reason: String,
}

impl SpamVerdict {
    /// Fail-closed verdict used when the classifier's reply is unreadable:
    /// the content is treated as spam so the send is blocked.
    #[must_use]
    pub fn unanalyzable() -> Self {
        Self {
            is_spam: true,
            confidence: 80,
            reason: UNANALYZABLE_REASON.to_string(),
        }
    }
}

/// Accept any JSON number and clamp it into `0..=100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}
