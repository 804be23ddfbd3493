//! Trigger: the recipient behaviour that activates a follow-up rule.

use serde::{Deserialize, Serialize};

/// Recipient behaviour observed on the previous message in the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    /// The recipient has not opened the message.
    #[default]
    NotOpened,
    /// The recipient opened the message.
    Opened,
    /// The recipient clicked a link in the message.
    LinkClicked,
    /// The recipient opened but did not click any link.
    NotClicked,
}

impl Trigger {
    /// Wire name, as used in JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotOpened => "not-opened",
            Self::Opened => "opened",
            Self::LinkClicked => "link-clicked",
            Self::NotClicked => "not-clicked",
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
