//! Campaign service: use-cases for drafts and their follow-up rules.

use outreach_domain::automation::{AutomationTree, RulePatch};
use outreach_domain::campaign::CampaignDraft;
use outreach_domain::error::{NotFoundError, OutreachError, ValidationError};
use outreach_domain::id::{CampaignId, RuleId};

use crate::ports::CampaignRepository;

/// Application service for campaign drafts.
///
/// Every edit runs inside [`CampaignRepository::modify`], so two requests
/// against the same draft never overwrite each other. An edit that targets an
/// unknown rule leaves the draft as it was and is not written.
pub struct CampaignService<R> {
    repo: R,
}

impl<R: CampaignRepository> CampaignService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new draft after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OutreachError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, draft), fields(campaign_name = %draft.name))]
    pub async fn create_campaign(&self, draft: CampaignDraft) -> Result<CampaignDraft, OutreachError> {
        draft.validate()?;
        self.repo.create(draft).await
    }

    /// Look up a draft by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`OutreachError::NotFound`] when no draft with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_campaign(&self, id: CampaignId) -> Result<CampaignDraft, OutreachError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Campaign",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all drafts.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_campaigns(&self) -> Result<Vec<CampaignDraft>, OutreachError> {
        self.repo.get_all().await
    }

    /// Apply `edit` to the stored draft, then validate and save it.
    ///
    /// The rule forest is read inside the same write as the edit, so rules
    /// added concurrently are kept.
    ///
    /// # Errors
    ///
    /// Returns [`OutreachError::Validation`] if invariants fail, or a
    /// not-found / storage error from the repository.
    #[tracing::instrument(skip(self, edit))]
    pub async fn update_campaign(
        &self,
        id: CampaignId,
        edit: impl FnOnce(&mut CampaignDraft) + Send,
    ) -> Result<CampaignDraft, OutreachError> {
        let ((), draft) = self
            .repo
            .modify(id, |draft| {
                edit(draft);
                draft.validate()?;
                draft.touch();
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    /// Delete a draft by id.
    ///
    /// # Errors
    ///
    /// Returns [`OutreachError::NotFound`] when the draft does not exist, or
    /// a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_campaign(&self, id: CampaignId) -> Result<(), OutreachError> {
        self.repo.delete(id).await
    }

    /// Append a default root rule to the draft's automation.
    ///
    /// # Errors
    ///
    /// Returns [`OutreachError::NotFound`] when the draft does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn add_root_rule(
        &self,
        id: CampaignId,
    ) -> Result<(RuleId, CampaignDraft), OutreachError> {
        self.repo
            .modify(id, |draft| {
                let rule_id = draft.automations.add_root_rule();
                draft.touch();
                Ok(rule_id)
            })
            .await
    }

    /// Merge `patch` into the rule `rule_id`. Unknown rules are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OutreachError::NotFound`] when the draft does not exist.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_rule(
        &self,
        id: CampaignId,
        rule_id: RuleId,
        patch: RulePatch,
    ) -> Result<CampaignDraft, OutreachError> {
        let (_, draft) = self
            .edit_automations(id, |tree| Ok(tree.update_rule(rule_id, patch).then_some(())))
            .await?;
        Ok(draft)
    }

    /// Append a default child under `parent_id`. Returns the new rule id, or
    /// `None` when the parent is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`OutreachError::NotFound`] when the draft does not exist, or
    /// [`OutreachError::Validation`] when the parent is already at the
    /// deepest allowed level.
    #[tracing::instrument(skip(self))]
    pub async fn add_sub_automation(
        &self,
        id: CampaignId,
        parent_id: RuleId,
    ) -> Result<(Option<RuleId>, CampaignDraft), OutreachError> {
        self.edit_automations(id, |tree| tree.add_sub_automation(parent_id))
            .await
    }

    /// Remove the rule `rule_id` and its subtree. Unknown rules are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OutreachError::NotFound`] when the draft does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_rule(
        &self,
        id: CampaignId,
        rule_id: RuleId,
    ) -> Result<CampaignDraft, OutreachError> {
        let (_, draft) = self
            .edit_automations(id, |tree| Ok(tree.delete_rule(rule_id).then_some(())))
            .await?;
        Ok(draft)
    }

    /// Apply `edit` to the draft's rule forest in a single repository write.
    /// `edit` returns `None` when it changed nothing, in which case the draft
    /// is not saved.
    async fn edit_automations<T: Send>(
        &self,
        id: CampaignId,
        edit: impl FnOnce(&mut AutomationTree) -> Result<Option<T>, ValidationError> + Send,
    ) -> Result<(Option<T>, CampaignDraft), OutreachError> {
        self.repo
            .modify(id, |draft| {
                let outcome = edit(&mut draft.automations)?;
                if outcome.is_some() {
                    draft.touch();
                } else {
                    tracing::debug!(campaign_id = %id, "rule edit targeted an unknown rule");
                }
                Ok(outcome)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_domain::automation::MAX_DEPTH;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryCampaignRepo {
        store: Mutex<HashMap<CampaignId, CampaignDraft>>,
        writes: Mutex<usize>,
    }

    impl InMemoryCampaignRepo {
        fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }

        fn apply<T>(
            &self,
            id: CampaignId,
            edit: impl FnOnce(&mut CampaignDraft) -> Result<T, OutreachError>,
        ) -> Result<(T, CampaignDraft), OutreachError> {
            let mut store = self.store.lock().unwrap();
            let stored = store.get_mut(&id).ok_or_else(|| missing(id))?;
            let mut draft = stored.clone();
            let outcome = edit(&mut draft)?;
            if draft != *stored {
                *stored = draft.clone();
                *self.writes.lock().unwrap() += 1;
            }
            Ok((outcome, draft))
        }
    }

    impl CampaignRepository for InMemoryCampaignRepo {
        fn create(
            &self,
            draft: CampaignDraft,
        ) -> impl Future<Output = Result<CampaignDraft, OutreachError>> + Send {
            self.store.lock().unwrap().insert(draft.id, draft.clone());
            *self.writes.lock().unwrap() += 1;
            async { Ok(draft) }
        }

        fn get_by_id(
            &self,
            id: CampaignId,
        ) -> impl Future<Output = Result<Option<CampaignDraft>, OutreachError>> + Send {
            let result = self.store.lock().unwrap().get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(
            &self,
        ) -> impl Future<Output = Result<Vec<CampaignDraft>, OutreachError>> + Send {
            let result: Vec<CampaignDraft> = self.store.lock().unwrap().values().cloned().collect();
            async { Ok(result) }
        }

        fn modify<T, F>(
            &self,
            id: CampaignId,
            edit: F,
        ) -> impl Future<Output = Result<(T, CampaignDraft), OutreachError>> + Send
        where
            T: Send,
            F: FnOnce(&mut CampaignDraft) -> Result<T, OutreachError> + Send,
        {
            let result = self.apply(id, edit);
            async { result }
        }

        fn delete(&self, id: CampaignId) -> impl Future<Output = Result<(), OutreachError>> + Send {
            let result = match self.store.lock().unwrap().remove(&id) {
                Some(_) => Ok(()),
                None => Err(missing(id)),
            };
            async { result }
        }
    }

    fn missing(id: CampaignId) -> OutreachError {
        NotFoundError {
            entity: "Campaign",
            id: id.to_string(),
        }
        .into()
    }

    fn make_service() -> CampaignService<InMemoryCampaignRepo> {
        CampaignService::new(InMemoryCampaignRepo::default())
    }

    fn valid_draft() -> CampaignDraft {
        CampaignDraft::builder()
            .name("Spring sale")
            .subject("Our spring collection is here")
            .content("Hi {{UserName}}, take a look at what is new this season.")
            .build()
            .unwrap()
    }

    async fn seeded() -> (CampaignService<InMemoryCampaignRepo>, CampaignId) {
        let svc = make_service();
        let draft = valid_draft();
        let id = draft.id;
        svc.create_campaign(draft).await.unwrap();
        (svc, id)
    }

    #[tokio::test]
    async fn should_create_campaign_when_valid() {
        let (svc, id) = seeded().await;
        let fetched = svc.get_campaign(id).await.unwrap();
        assert_eq!(fetched.name, "Spring sale");
    }

    #[tokio::test]
    async fn should_reject_create_when_name_is_empty() {
        let svc = make_service();
        let mut draft = valid_draft();
        draft.name = String::new();

        let result = svc.create_campaign(draft).await;
        assert!(matches!(
            result,
            Err(OutreachError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_campaign_missing() {
        let svc = make_service();
        let result = svc.get_campaign(CampaignId::new()).await;
        assert!(matches!(result, Err(OutreachError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_campaigns() {
        let svc = make_service();
        svc.create_campaign(valid_draft()).await.unwrap();
        svc.create_campaign(valid_draft()).await.unwrap();
        assert_eq!(svc.list_campaigns().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_update_campaign_fields() {
        let (svc, id) = seeded().await;
        let saved = svc
            .update_campaign(id, |draft| draft.subject = "Last chance".to_string())
            .await
            .unwrap();
        assert_eq!(saved.subject, "Last chance");
        assert!(saved.updated_at >= saved.created_at);
    }

    #[tokio::test]
    async fn should_keep_rules_when_campaign_fields_are_updated() {
        let (svc, id) = seeded().await;
        let (rule_id, _) = svc.add_root_rule(id).await.unwrap();

        let saved = svc
            .update_campaign(id, |draft| draft.name = "Summer sale".to_string())
            .await
            .unwrap();

        assert_eq!(saved.name, "Summer sale");
        assert_eq!(saved.automations.roots(), &[rule_id]);
    }

    #[tokio::test]
    async fn should_leave_stored_draft_untouched_when_update_is_invalid() {
        let (svc, id) = seeded().await;
        let before = svc.get_campaign(id).await.unwrap();

        let result = svc
            .update_campaign(id, |draft| draft.name = "  ".to_string())
            .await;

        assert!(matches!(
            result,
            Err(OutreachError::Validation(ValidationError::EmptyName))
        ));
        assert_eq!(svc.get_campaign(id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn should_delete_campaign() {
        let (svc, id) = seeded().await;
        svc.delete_campaign(id).await.unwrap();
        let result = svc.get_campaign(id).await;
        assert!(matches!(result, Err(OutreachError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_campaign() {
        let (svc, id) = seeded().await;
        svc.delete_campaign(id).await.unwrap();
        let result = svc.delete_campaign(id).await;
        assert!(matches!(result, Err(OutreachError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_persist_root_rule_added_to_campaign() {
        let (svc, id) = seeded().await;
        let (rule_id, draft) = svc.add_root_rule(id).await.unwrap();
        assert_eq!(draft.automations.roots(), &[rule_id]);

        let stored = svc.get_campaign(id).await.unwrap();
        assert_eq!(stored.automations.get(rule_id).unwrap().name, "Rule 1");
    }

    #[tokio::test]
    async fn should_chain_sub_automations_under_a_rule() {
        let (svc, id) = seeded().await;
        let (root, _) = svc.add_root_rule(id).await.unwrap();

        let (first, _) = svc.add_sub_automation(id, root).await.unwrap();
        let (second, draft) = svc.add_sub_automation(id, root).await.unwrap();

        let children = draft.automations.children(root);
        assert_eq!(children, &[first.unwrap(), second.unwrap()]);
        assert_eq!(
            draft.automations.get(children[1]).unwrap().name,
            "Sub-Rule 2"
        );
    }

    #[tokio::test]
    async fn should_update_rule_message() {
        let (svc, id) = seeded().await;
        let (root, _) = svc.add_root_rule(id).await.unwrap();
        let draft = svc
            .update_rule(id, root, RulePatch::message("Still interested?"))
            .await
            .unwrap();
        assert_eq!(
            draft.automations.get(root).unwrap().message,
            "Still interested?"
        );
    }

    #[tokio::test]
    async fn should_delete_rule_with_its_subtree() {
        let (svc, id) = seeded().await;
        let (root, _) = svc.add_root_rule(id).await.unwrap();
        svc.add_sub_automation(id, root).await.unwrap();
        let draft = svc.delete_rule(id, root).await.unwrap();
        assert!(draft.automations.is_empty());
    }

    #[tokio::test]
    async fn should_not_write_when_rule_edit_targets_unknown_rule() {
        let (svc, id) = seeded().await;
        svc.add_root_rule(id).await.unwrap();
        let before = svc.get_campaign(id).await.unwrap();
        let writes = svc.repo.writes();

        let updated = svc
            .update_rule(id, RuleId::new(), RulePatch::active(false))
            .await
            .unwrap();
        let (added, _) = svc.add_sub_automation(id, RuleId::new()).await.unwrap();
        let deleted = svc.delete_rule(id, RuleId::new()).await.unwrap();

        assert!(added.is_none());
        assert_eq!(updated, before);
        assert_eq!(deleted, before);
        assert_eq!(svc.repo.writes(), writes);
    }

    #[tokio::test]
    async fn should_reject_sub_automation_past_max_depth_without_writing() {
        let (svc, id) = seeded().await;
        let (mut deepest, _) = svc.add_root_rule(id).await.unwrap();
        for _ in 1..MAX_DEPTH {
            let (child, _) = svc.add_sub_automation(id, deepest).await.unwrap();
            deepest = child.unwrap();
        }
        let writes = svc.repo.writes();

        let result = svc.add_sub_automation(id, deepest).await;

        assert!(matches!(
            result,
            Err(OutreachError::Validation(ValidationError::NestingTooDeep { .. }))
        ));
        assert_eq!(svc.repo.writes(), writes);
    }

    #[tokio::test]
    async fn should_return_not_found_when_editing_rules_of_missing_campaign() {
        let svc = make_service();
        let result = svc.add_root_rule(CampaignId::new()).await;
        assert!(matches!(result, Err(OutreachError::NotFound(_))));
    }
}
