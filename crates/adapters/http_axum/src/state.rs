//! Shared application state for axum handlers.

use std::sync::Arc;

use outreach_app::ports::{CampaignRepository, CompletionClient};
use outreach_app::services::campaign_service::CampaignService;
use outreach_app::services::spam_check_service::SpamCheckService;

/// Application state shared across all axum handlers.
///
/// Generic over the campaign repository and the completion client to avoid
/// dynamic dispatch. `Clone` is implemented manually so only the `Arc`
/// wrappers are cloned.
pub struct AppState<CR, CC> {
    /// Campaign draft and rule-editing service.
    pub campaign_service: Arc<CampaignService<CR>>,
    /// Spam classification service.
    pub spam_check_service: Arc<SpamCheckService<CC>>,
}

impl<CR, CC> Clone for AppState<CR, CC> {
    fn clone(&self) -> Self {
        Self {
            campaign_service: Arc::clone(&self.campaign_service),
            spam_check_service: Arc::clone(&self.spam_check_service),
        }
    }
}

impl<CR, CC> AppState<CR, CC>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        campaign_service: CampaignService<CR>,
        spam_check_service: SpamCheckService<CC>,
    ) -> Self {
        Self {
            campaign_service: Arc::new(campaign_service),
            spam_check_service: Arc::new(spam_check_service),
        }
    }
}
