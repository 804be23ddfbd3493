//! reqwest-backed [`CompletionClient`].

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use outreach_app::ports::{ChatMessage, CompletionClient, CompletionError};

use crate::config::GatewayConfig;
use crate::wire::{CompletionRequest, CompletionResponse, WireMessage};

/// HTTP client for the chat-completions gateway.
///
/// A missing API key does not prevent construction; every call then fails
/// with [`CompletionError::MissingApiKey`].
pub struct GatewayClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
}

impl GatewayClient {
    /// Build a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns the underlying reqwest error if the HTTP client (TLS backend)
    /// cannot be initialised.
    pub fn new(config: &GatewayConfig, api_key: Option<SecretString>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        if api_key.is_none() {
            tracing::warn!("no AI gateway API key configured, spam checks will fail open");
        }
        Ok(Self {
            http,
            endpoint: config.endpoint(),
            model: config.model.clone(),
            api_key,
        })
    }
}

impl CompletionClient for GatewayClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
        let Some(api_key) = self.api_key.as_ref() else {
            return Err(CompletionError::MissingApiKey);
        };
        let body = CompletionRequest {
            model: &self.model,
            messages: messages.iter().map(WireMessage::from).collect(),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| CompletionError::Transport(Box::new(err)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionError::RateLimited);
        }
        if status == StatusCode::PAYMENT_REQUIRED {
            return Err(CompletionError::PaymentRequired);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %text, "AI gateway error");
            return Err(CompletionError::Status {
                status: status.as_u16(),
            });
        }

        let payload: CompletionResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::MalformedResponse(err.to_string()))?;
        payload
            .into_first_text()
            .ok_or_else(|| CompletionError::MalformedResponse("response has no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::post;
    use serde_json::{Value, json};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn client(base_url: String, api_key: Option<&str>) -> GatewayClient {
        let config = GatewayConfig {
            base_url,
            model: "test-model".to_string(),
            timeout_secs: 5,
        };
        GatewayClient::new(&config, api_key.map(|k| SecretString::from(k.to_string()))).unwrap()
    }

    fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage::system("be brief"), ChatMessage::user("hello")]
    }

    fn status_router(status: AxumStatus) -> Router {
        Router::new().route(
            "/v1/chat/completions",
            post(move || async move { (status, Json(json!({"error": "upstream"}))) }),
        )
    }

    #[tokio::test]
    async fn should_return_first_choice_text() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let echo = format!(
                    "{auth}|{}|{}|{}",
                    body["model"].as_str().unwrap_or_default(),
                    body["messages"][0]["role"].as_str().unwrap_or_default(),
                    body["messages"][1]["content"].as_str().unwrap_or_default(),
                );
                Json(json!({"choices": [{"message": {"role": "assistant", "content": echo}}]}))
            }),
        );
        let base = serve(router).await;

        let reply = client(base, Some("sk-test")).complete(messages()).await.unwrap();

        assert_eq!(reply, "Bearer sk-test|test-model|system|hello");
    }

    #[tokio::test]
    async fn should_map_429_to_rate_limited() {
        let base = serve(status_router(AxumStatus::TOO_MANY_REQUESTS)).await;
        let result = client(base, Some("k")).complete(messages()).await;
        assert!(matches!(result, Err(CompletionError::RateLimited)));
    }

    #[tokio::test]
    async fn should_map_402_to_payment_required() {
        let base = serve(status_router(AxumStatus::PAYMENT_REQUIRED)).await;
        let result = client(base, Some("k")).complete(messages()).await;
        assert!(matches!(result, Err(CompletionError::PaymentRequired)));
    }

    #[tokio::test]
    async fn should_map_other_failure_status_to_status_error() {
        let base = serve(status_router(AxumStatus::BAD_GATEWAY)).await;
        let result = client(base, Some("k")).complete(messages()).await;
        assert!(matches!(
            result,
            Err(CompletionError::Status { status: 502 })
        ));
    }

    #[tokio::test]
    async fn should_report_malformed_response_when_no_choices() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let base = serve(router).await;
        let result = client(base, Some("k")).complete(messages()).await;
        assert!(matches!(result, Err(CompletionError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn should_fail_without_calling_upstream_when_key_missing() {
        let result = client("http://127.0.0.1:9/v1".to_string(), None)
            .complete(messages())
            .await;
        assert!(matches!(result, Err(CompletionError::MissingApiKey)));
    }

    #[tokio::test]
    async fn should_report_transport_error_when_gateway_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client(format!("http://{addr}/v1"), Some("k"))
            .complete(messages())
            .await;
        assert!(matches!(result, Err(CompletionError::Transport(_))));
    }
}
