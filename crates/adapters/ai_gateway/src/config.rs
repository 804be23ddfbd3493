//! AI gateway configuration.

use std::time::Duration;

use serde::Deserialize;

/// Connection settings for the chat-completions gateway.
///
/// The API key is not part of this struct: it is read from the environment
/// and handed to [`GatewayClient::new`](crate::GatewayClient::new) separately.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Full URL of the completions endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ai.gateway.lovable.dev/v1".to_string(),
            model: "google/gemini-2.5-flash".to_string(),
            timeout_secs: 30,
        }
    }
}
