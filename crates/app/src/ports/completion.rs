//! Completion port: a single chat-completion exchange with an AI gateway.

use std::future::Future;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// One message of the conversation sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Failure to obtain a reply from the gateway.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The gateway answered `429 Too Many Requests`.
    #[error("rate limited by upstream gateway")]
    RateLimited,

    /// The gateway answered `402 Payment Required`.
    #[error("upstream gateway requires payment")]
    PaymentRequired,

    /// The gateway answered with any other non-success status.
    #[error("AI gateway error (status {status})")]
    Status { status: u16 },

    #[error("gateway API key is not configured")]
    MissingApiKey,

    /// The gateway replied successfully but without a usable message.
    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),

    /// The request never produced a response (connect, timeout, TLS, …).
    #[error("gateway request failed")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Sends a conversation to a chat-completion model and returns the text of
/// the first choice.
pub trait CompletionClient {
    fn complete(
        &self,
        messages: Vec<ChatMessage>,
    ) -> impl Future<Output = Result<String, CompletionError>> + Send;
}
