//! Campaign draft: the message being composed and its follow-up automation.

use serde::{Deserialize, Serialize};

use crate::automation::AutomationTree;
use crate::error::{OutreachError, ValidationError};
use crate::id::CampaignId;
use crate::spam::SpamCheckRequest;
use crate::time::{self, Timestamp};

/// Delivery channel of a campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Email,
    Whatsapp,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Whatsapp => f.write_str("whatsapp"),
        }
    }
}

/// A campaign being composed, not yet sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub id: CampaignId,
    pub name: String,
    pub channel: Channel,
    pub subject: String,
    pub content: String,
    pub scheduled_at: Option<Timestamp>,
    pub automations: AutomationTree,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CampaignDraft {
    /// Create a builder for constructing a [`CampaignDraft`].
    #[must_use]
    pub fn builder() -> CampaignDraftBuilder {
        CampaignDraftBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OutreachError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), OutreachError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Record a modification.
    pub fn touch(&mut self) {
        self.updated_at = time::now();
    }

    /// The subject and body to classify before sending.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when the subject or the
    /// content is blank: there is nothing meaningful to classify yet.
    pub fn spam_check_request(&self) -> Result<SpamCheckRequest, ValidationError> {
        if self.subject.trim().is_empty() {
            return Err(ValidationError::EmptyField("subject"));
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyField("content"));
        }
        Ok(SpamCheckRequest::new(&self.subject, &self.content))
    }
}

/// Step-by-step builder for [`CampaignDraft`].
#[derive(Debug, Default)]
pub struct CampaignDraftBuilder {
    id: Option<CampaignId>,
    name: Option<String>,
    channel: Option<Channel>,
    subject: Option<String>,
    content: Option<String>,
    scheduled_at: Option<Timestamp>,
    automations: Option<AutomationTree>,
}

impl CampaignDraftBuilder {
    #[must_use]
    pub fn id(mut self, id: CampaignId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn scheduled_at(mut self, ts: Timestamp) -> Self {
        self.scheduled_at = Some(ts);
        self
    }

    #[must_use]
    pub fn automations(mut self, automations: AutomationTree) -> Self {
        self.automations = Some(automations);
        self
    }

    /// Consume the builder, validate, and return a [`CampaignDraft`].
    ///
    /// # Errors
    ///
    /// Returns [`OutreachError::Validation`] if the name is missing or empty.
    pub fn build(self) -> Result<CampaignDraft, OutreachError> {
        let now = time::now();
        let draft = CampaignDraft {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            channel: self.channel.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            scheduled_at: self.scheduled_at,
            automations: self.automations.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        draft.validate()?;
        Ok(draft)
    }
}
