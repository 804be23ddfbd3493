//! Campaign repository port: persistence for campaign drafts.

use std::future::Future;

use outreach_domain::campaign::CampaignDraft;
use outreach_domain::error::OutreachError;
use outreach_domain::id::CampaignId;

/// Repository for persisting and querying [`CampaignDraft`]s.
pub trait CampaignRepository {
    /// Store a new draft.
    fn create(
        &self,
        draft: CampaignDraft,
    ) -> impl Future<Output = Result<CampaignDraft, OutreachError>> + Send;

    /// Get a draft by its unique identifier.
    fn get_by_id(
        &self,
        id: CampaignId,
    ) -> impl Future<Output = Result<Option<CampaignDraft>, OutreachError>> + Send;

    /// Get all drafts, oldest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<CampaignDraft>, OutreachError>> + Send;

    /// Run `edit` against the stored draft with no other write in between.
    ///
    /// The edited draft replaces the stored one only when `edit` returns
    /// `Ok` and the draft actually changed. Returns the outcome together with
    /// the draft as it now stands. A missing draft is a not-found error.
    fn modify<T, F>(
        &self,
        id: CampaignId,
        edit: F,
    ) -> impl Future<Output = Result<(T, CampaignDraft), OutreachError>> + Send
    where
        T: Send,
        F: FnOnce(&mut CampaignDraft) -> Result<T, OutreachError> + Send;

    /// Delete a draft by its unique identifier.
    ///
    /// A missing draft is a not-found error.
    fn delete(&self, id: CampaignId) -> impl Future<Output = Result<(), OutreachError>> + Send;
}
