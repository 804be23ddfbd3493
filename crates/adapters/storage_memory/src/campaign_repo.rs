//! `CampaignRepository` backed by a `HashMap` behind a tokio `RwLock`.

use std::collections::HashMap;

use tokio::sync::RwLock;

use outreach_app::ports::CampaignRepository;
use outreach_domain::campaign::CampaignDraft;
use outreach_domain::error::{NotFoundError, OutreachError};
use outreach_domain::id::CampaignId;

/// Process-local draft store.
#[derive(Debug, Default)]
pub struct InMemoryCampaignRepository {
    drafts: RwLock<HashMap<CampaignId, CampaignDraft>>,
}

impl InMemoryCampaignRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: CampaignId) -> OutreachError {
    NotFoundError {
        entity: "Campaign",
        id: id.to_string(),
    }
    .into()
}

impl CampaignRepository for InMemoryCampaignRepository {
    async fn create(&self, draft: CampaignDraft) -> Result<CampaignDraft, OutreachError> {
        self.drafts.write().await.insert(draft.id, draft.clone());
        Ok(draft)
    }

    async fn get_by_id(&self, id: CampaignId) -> Result<Option<CampaignDraft>, OutreachError> {
        Ok(self.drafts.read().await.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<CampaignDraft>, OutreachError> {
        let mut drafts: Vec<CampaignDraft> = self.drafts.read().await.values().cloned().collect();
        drafts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(drafts)
    }

    async fn modify<T, F>(
        &self,
        id: CampaignId,
        edit: F,
    ) -> Result<(T, CampaignDraft), OutreachError>
    where
        T: Send,
        F: FnOnce(&mut CampaignDraft) -> Result<T, OutreachError> + Send,
    {
        let mut drafts = self.drafts.write().await;
        let Some(stored) = drafts.get_mut(&id) else {
            return Err(not_found(id));
        };
        let mut draft = stored.clone();
        let outcome = edit(&mut draft)?;
        if draft != *stored {
            *stored = draft.clone();
        }
        Ok((outcome, draft))
    }

    async fn delete(&self, id: CampaignId) -> Result<(), OutreachError> {
        match self.drafts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(not_found(id)),
        }
    }
}
