//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod automations;
#[allow(clippy::missing_errors_doc)]
pub mod campaigns;
#[allow(clippy::missing_errors_doc)]
pub mod spam;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, patch, post};

use outreach_app::ports::{CampaignRepository, CompletionClient};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<CR, CC>() -> Router<AppState<CR, CC>>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    Router::new()
        // Spam check
        .route("/check-spam-content", post(spam::check_content::<CR, CC>))
        // Campaigns
        .route(
            "/campaigns",
            get(campaigns::list::<CR, CC>).post(campaigns::create::<CR, CC>),
        )
        .route(
            "/campaigns/{id}",
            get(campaigns::get::<CR, CC>)
                .put(campaigns::update::<CR, CC>)
                .delete(campaigns::delete::<CR, CC>),
        )
        .route(
            "/campaigns/{id}/spam-check",
            post(spam::check_campaign::<CR, CC>),
        )
        // Automation rules
        .route(
            "/campaigns/{id}/automations",
            get(automations::list::<CR, CC>).post(automations::add_root::<CR, CC>),
        )
        .route(
            "/campaigns/{id}/automations/{rule_id}",
            patch(automations::update::<CR, CC>).delete(automations::delete::<CR, CC>),
        )
        .route(
            "/campaigns/{id}/automations/{rule_id}/sub-automations",
            post(automations::add_sub::<CR, CC>),
        )
}

/// Parse a path segment into a typed identifier.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    T::from_str(raw).map_err(|_| ApiError::invalid_id(raw))
}
