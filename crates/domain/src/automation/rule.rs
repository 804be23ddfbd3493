//! A single follow-up rule, its partial-update patch, and its nested wire form.

use std::num::NonZeroU32;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{TimeUnit, Trigger};
use crate::id::RuleId;

/// One follow-up action: "when `trigger` holds, wait `wait_days` × `time_unit`,
/// then send `message`".
///
/// A rule's children live in the enclosing
/// [`AutomationTree`](super::AutomationTree), not on the rule itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRule {
    pub id: RuleId,
    pub name: String,
    pub active: bool,
    pub trigger: Trigger,
    pub wait_days: NonZeroU32,
    pub time_unit: TimeUnit,
    /// Free text; may embed `{{Placeholder}}` tokens resolved at send time.
    pub message: String,
}

impl FollowUpRule {
    /// A freshly created rule: active, `not-opened`, one day, empty message.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RuleId::new(),
            name: name.into(),
            active: true,
            trigger: Trigger::default(),
            wait_days: NonZeroU32::MIN,
            time_unit: TimeUnit::default(),
            message: String::new(),
        }
    }

    /// Shallow-merge the fields present in `patch`.
    pub fn apply(&mut self, patch: RulePatch) {
        let RulePatch {
            name,
            active,
            trigger,
            wait_days,
            time_unit,
            message,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(active) = active {
            self.active = active;
        }
        if let Some(trigger) = trigger {
            self.trigger = trigger;
        }
        if let Some(wait_days) = wait_days {
            self.wait_days = wait_days;
        }
        if let Some(time_unit) = time_unit {
            self.time_unit = time_unit;
        }
        if let Some(message) = message {
            self.message = message;
        }
    }

    /// How long to wait after the trigger before sending.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.time_unit.duration(self.wait_days)
    }
}

/// Partial update for a [`FollowUpRule`]. Absent fields are left unchanged.
///
/// Identity and children are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RulePatch {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub trigger: Option<Trigger>,
    pub wait_days: Option<NonZeroU32>,
    pub time_unit: Option<TimeUnit>,
    pub message: Option<String>,
}

impl RulePatch {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }
}

/// Nested wire form of a rule and its whole subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRule {
    pub id: RuleId,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub trigger: Trigger,
    #[serde(default = "default_wait")]
    pub wait_days: NonZeroU32,
    #[serde(default)]
    pub time_unit: TimeUnit,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sub_automations: Vec<AutomationRule>,
}

fn default_active() -> bool {
    true
}

fn default_wait() -> NonZeroU32 {
    NonZeroU32::MIN
}

impl AutomationRule {
    pub(crate) fn from_parts(rule: FollowUpRule, sub_automations: Vec<AutomationRule>) -> Self {
        Self {
            id: rule.id,
            name: rule.name,
            active: rule.active,
            trigger: rule.trigger,
            wait_days: rule.wait_days,
            time_unit: rule.time_unit,
            message: rule.message,
            sub_automations,
        }
    }

    pub(crate) fn into_parts(self) -> (FollowUpRule, Vec<AutomationRule>) {
        let rule = FollowUpRule {
            id: self.id,
            name: self.name,
            active: self.active,
            trigger: self.trigger,
            wait_days: self.wait_days,
            time_unit: self.time_unit,
            message: self.message,
        };
        (rule, self.sub_automations)
    }
}
