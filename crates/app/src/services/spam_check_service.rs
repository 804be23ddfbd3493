//! Spam check service: asks a chat-completion model whether a message looks
//! like spam and normalizes its answer.
//!
//! Two failure policies apply and are intentionally different:
//! - the model answered but the answer cannot be read: **fail closed**, the
//!   content is reported as spam ([`SpamVerdict::unanalyzable`]);
//! - the model could not be reached at all: the caller gets a
//!   [`SpamCheckError`] and is expected to **fail open** (let the send go).

use std::sync::LazyLock;

use regex::Regex;

use outreach_domain::spam::{SpamCheckRequest, SpamVerdict};

use crate::ports::{ChatMessage, CompletionClient, CompletionError};

/// System message sent ahead of every classification prompt.
pub const SYSTEM_PROMPT: &str =
    "You are a spam detection system. Always respond with valid JSON only.";

/// First `{` through the last `}` of the reply.
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("JSON object pattern is valid"));

/// Why no verdict could be produced.
#[derive(Debug, thiserror::Error)]
pub enum SpamCheckError {
    /// The gateway is throttling us.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The gateway account is out of credits.
    #[error("Payment required. Please add credits to your workspace.")]
    PaymentRequired,

    /// Any other failure to reach the model.
    #[error("{0}")]
    Unavailable(#[source] CompletionError),
}

impl From<CompletionError> for SpamCheckError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::RateLimited => Self::RateLimited,
            CompletionError::PaymentRequired => Self::PaymentRequired,
            other => Self::Unavailable(other),
        }
    }
}

/// User prompt asking the model to classify `request`.
///
/// Content is flagged when *either* the subject or the body alone looks
/// spammy.
#[must_use]
pub fn classification_prompt(request: &SpamCheckRequest) -> String {
    format!(
        r#"You are a spam detection system for email campaigns. Analyze the following email content and determine if it appears to be spam or low-quality content.

Subject: {subject}
Content: {content}

Check for:
1. Repetitive meaningless characters (like "ddddd", "aaaaa", etc.)
2. Excessive use of spam trigger words
3. Lack of coherent sentences or meaning
4. Suspicious patterns that could trigger spam filters

Respond with a JSON object in this exact format:
{{
  "isSpam": true/false,
  "confidence": 0-100,
  "reason": "Brief explanation of why this might be marked as spam"
}}

Be strict: Even if only the subject OR content contains spam-like patterns, mark it as spam."#,
        subject = request.subject,
        content = request.content,
    )
}

/// Extract a verdict from free-form model output.
///
/// Tries the embedded `{…}` span first, then the whole reply. Returns `None`
/// when neither parses.
#[must_use]
pub fn parse_verdict(reply: &str) -> Option<SpamVerdict> {
    let embedded = JSON_OBJECT.find(reply).map(|m| m.as_str());
    embedded
        .into_iter()
        .chain(std::iter::once(reply.trim()))
        .find_map(|candidate| serde_json::from_str(candidate).ok())
}

/// Application service classifying campaign content.
pub struct SpamCheckService<C> {
    client: C,
}

impl<C: CompletionClient> SpamCheckService<C> {
    /// Create a new service backed by the given completion client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Classify `request`, making exactly one gateway call.
    ///
    /// # Errors
    ///
    /// Returns [`SpamCheckError::RateLimited`] / [`SpamCheckError::PaymentRequired`]
    /// for the matching upstream statuses, and [`SpamCheckError::Unavailable`]
    /// for every other transport or configuration failure. An unreadable
    /// reply is *not* an error: it yields [`SpamVerdict::unanalyzable`].
    #[tracing::instrument(
        skip_all,
        fields(subject_len = request.subject.len(), content_len = request.content.len())
    )]
    pub async fn check(&self, request: &SpamCheckRequest) -> Result<SpamVerdict, SpamCheckError> {
        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(classification_prompt(request)),
        ];
        let reply = self.client.complete(messages).await.map_err(|err| {
            tracing::error!(error = %err, "spam classification request failed");
            SpamCheckError::from(err)
        })?;
        tracing::debug!(%reply, "classifier reply");

        let verdict = parse_verdict(&reply).unwrap_or_else(|| {
            tracing::warn!("classifier reply is not a verdict, treating content as spam");
            SpamVerdict::unanalyzable()
        });
        tracing::info!(
            is_spam = verdict.is_spam,
            confidence = verdict.confidence,
            "content classified"
        );
        Ok(verdict)
    }
}
