//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`OutreachError`] via `#[from]` when crossing a port boundary.

use crate::id::RuleId;

/// Top-level error for domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum OutreachError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("rule {0} appears more than once in the automation tree")]
    DuplicateRuleId(RuleId),

    #[error("automation rules cannot be nested more than {max} levels deep")]
    NestingTooDeep { max: usize },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Campaign",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Campaign abc not found");
    }

    #[test]
    fn should_convert_validation_error_into_outreach_error() {
        let err: OutreachError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            OutreachError::Validation(ValidationError::EmptyName)
        ));
    }
}
