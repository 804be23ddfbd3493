//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use outreach_app::services::spam_check_service::SpamCheckError;
use outreach_domain::error::{OutreachError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Error body of a failed spam check that the caller should let through.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FailOpenBody {
    error: String,
    is_spam: bool,
}

/// Maps [`OutreachError`] to an HTTP response with appropriate status code.
pub struct ApiError(OutreachError);

impl ApiError {
    /// A path segment that is not a valid identifier.
    pub fn invalid_id(raw: &str) -> Self {
        Self(ValidationError::InvalidId(raw.to_string()).into())
    }
}

impl From<OutreachError> for ApiError {
    fn from(err: OutreachError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            OutreachError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            OutreachError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            OutreachError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Failure of a spam-check endpoint.
///
/// Rate-limit and payment errors keep their upstream status. Everything else
/// is a `500` carrying `isSpam: false` so that clients fail open.
pub enum SpamApiError {
    Check(SpamCheckError),
    InvalidBody(JsonRejection),
    Campaign(ApiError),
}

impl From<SpamCheckError> for SpamApiError {
    fn from(err: SpamCheckError) -> Self {
        Self::Check(err)
    }
}

impl From<JsonRejection> for SpamApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl From<ApiError> for SpamApiError {
    fn from(err: ApiError) -> Self {
        Self::Campaign(err)
    }
}

impl From<OutreachError> for SpamApiError {
    fn from(err: OutreachError) -> Self {
        Self::Campaign(err.into())
    }
}

impl IntoResponse for SpamApiError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Campaign(err) => return err.into_response(),
            Self::Check(err @ SpamCheckError::RateLimited) => {
                let body = ErrorBody {
                    error: err.to_string(),
                };
                return (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
            }
            Self::Check(err @ SpamCheckError::PaymentRequired) => {
                let body = ErrorBody {
                    error: err.to_string(),
                };
                return (StatusCode::PAYMENT_REQUIRED, Json(body)).into_response();
            }
            Self::Check(err @ SpamCheckError::Unavailable(_)) => err.to_string(),
            Self::InvalidBody(rejection) => {
                tracing::error!(error = %rejection.body_text(), "invalid spam check request");
                rejection.body_text()
            }
        };

        let body = FailOpenBody {
            error: message,
            is_spam: false,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
