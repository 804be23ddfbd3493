//! The follow-up rule forest owned by a campaign draft.
//!
//! Nodes are stored in an arena keyed by [`RuleId`]. Each node records its
//! parent and its ordered child ids, so an update touches exactly one entry
//! and a delete touches the containing list plus the removed subtree.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::rule::{AutomationRule, FollowUpRule, RulePatch};
use crate::error::ValidationError;
use crate::id::RuleId;

/// Deepest nesting level a rule may sit at; root rules are level 1.
///
/// Each level adds an object and an array to the nested JSON form, and
/// `serde_json` refuses input nested more than 128 deep. Fifty levels keep a
/// whole campaign draft readable with room to spare.
pub const MAX_DEPTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    rule: FollowUpRule,
    parent: Option<RuleId>,
    children: Vec<RuleId>,
}

/// Ordered forest of follow-up rules, nested up to [`MAX_DEPTH`] levels.
///
/// An id that is not in the forest makes an editing operation a no-op rather
/// than an error. The only failure is nesting past [`MAX_DEPTH`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<AutomationRule>", try_from = "Vec<AutomationRule>")]
pub struct AutomationTree {
    roots: Vec<RuleId>,
    nodes: HashMap<RuleId, Node>,
}

impl AutomationTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a default rule named `Rule N` to the root list.
    pub fn add_root_rule(&mut self) -> RuleId {
        let rule = FollowUpRule::new(format!("Rule {}", self.roots.len() + 1));
        let id = rule.id;
        self.roots.push(id);
        self.nodes.insert(
            id,
            Node {
                rule,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    /// Merge `patch` into the rule with `id`, wherever it sits.
    ///
    /// Returns `false` (and changes nothing) when `id` is unknown.
    pub fn update_rule(&mut self, id: RuleId, patch: RulePatch) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.rule.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Append a default child named `Sub-Rule N` under `parent_id`.
    ///
    /// `N` counts the existing children of that parent only.
    /// Returns `Ok(None)` when `parent_id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NestingTooDeep`] when the child would sit
    /// deeper than [`MAX_DEPTH`]; the forest is left unchanged.
    pub fn add_sub_automation(
        &mut self,
        parent_id: RuleId,
    ) -> Result<Option<RuleId>, ValidationError> {
        let Some(parent_depth) = self.depth(parent_id) else {
            return Ok(None);
        };
        if parent_depth + 2 > MAX_DEPTH {
            return Err(ValidationError::NestingTooDeep { max: MAX_DEPTH });
        }
        let Some(parent) = self.nodes.get_mut(&parent_id) else {
            return Ok(None);
        };
        let rule = FollowUpRule::new(format!("Sub-Rule {}", parent.children.len() + 1));
        let id = rule.id;
        parent.children.push(id);
        self.nodes.insert(
            id,
            Node {
                rule,
                parent: Some(parent_id),
                children: Vec::new(),
            },
        );
        Ok(Some(id))
    }

    /// Remove the rule with `id` and its entire subtree.
    ///
    /// Returns `false` when `id` is unknown, so a repeated delete is a no-op.
    pub fn delete_rule(&mut self, id: RuleId) -> bool {
        let Some(parent) = self.nodes.get(&id).map(|node| node.parent) else {
            return false;
        };
        match parent {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.retain(|child| *child != id);
                }
            }
            None => self.roots.retain(|root| *root != id),
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend(node.children);
            }
        }
        true
    }

    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&FollowUpRule> {
        self.nodes.get(&id).map(|node| &node.rule)
    }

    /// Wait between the trigger and the send for rule `id`.
    #[must_use]
    pub fn delay(&self, id: RuleId) -> Option<Duration> {
        self.get(id).map(FollowUpRule::delay)
    }

    #[must_use]
    pub fn contains(&self, id: RuleId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Root rule ids in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[RuleId] {
        &self.roots
    }

    /// Child ids of `id` in insertion order; empty when `id` is unknown.
    #[must_use]
    pub fn children(&self, id: RuleId) -> &[RuleId] {
        self.nodes
            .get(&id)
            .map_or(&[][..], |node| node.children.as_slice())
    }

    #[must_use]
    pub fn parent(&self, id: RuleId) -> Option<RuleId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// Nesting level of `id`: `0` for root rules.
    #[must_use]
    pub fn depth(&self, id: RuleId) -> Option<usize> {
        let mut current = self.nodes.get(&id)?;
        let mut depth = 0;
        while let Some(parent) = current.parent.and_then(|p| self.nodes.get(&p)) {
            depth += 1;
            current = parent;
        }
        Some(depth)
    }

    /// Total number of rules at every depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every rule id, depth-first in pre-order.
    #[must_use]
    pub fn ids(&self) -> Vec<RuleId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<RuleId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Render the forest in its nested wire form.
    #[must_use]
    pub fn to_nested(&self) -> Vec<AutomationRule> {
        self.roots.iter().filter_map(|id| self.nested(*id)).collect()
    }

    fn nested(&self, id: RuleId) -> Option<AutomationRule> {
        let node = self.nodes.get(&id)?;
        let children = node
            .children
            .iter()
            .filter_map(|child| self.nested(*child))
            .collect();
        Some(AutomationRule::from_parts(node.rule.clone(), children))
    }

    /// Rebuild a forest from its nested wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateRuleId`] when the same id appears
    /// twice anywhere in `rules`, and [`ValidationError::NestingTooDeep`]
    /// when a rule sits deeper than [`MAX_DEPTH`].
    pub fn from_nested(rules: Vec<AutomationRule>) -> Result<Self, ValidationError> {
        let mut tree = Self::default();
        for rule in rules {
            let id = tree.insert_nested(rule, None, 1)?;
            tree.roots.push(id);
        }
        Ok(tree)
    }

    fn insert_nested(
        &mut self,
        rule: AutomationRule,
        parent: Option<RuleId>,
        level: usize,
    ) -> Result<RuleId, ValidationError> {
        if level > MAX_DEPTH {
            return Err(ValidationError::NestingTooDeep { max: MAX_DEPTH });
        }
        let (rule, subs) = rule.into_parts();
        let id = rule.id;
        if self.nodes.contains_key(&id) {
            return Err(ValidationError::DuplicateRuleId(id));
        }
        self.nodes.insert(
            id,
            Node {
                rule,
                parent,
                children: Vec::with_capacity(subs.len()),
            },
        );
        for sub in subs {
            let child = self.insert_nested(sub, Some(id), level + 1)?;
            if let Some(node) = self.nodes.get_mut(&id) {
                node.children.push(child);
            }
        }
        Ok(id)
    }
}

impl From<AutomationTree> for Vec<AutomationRule> {
    fn from(tree: AutomationTree) -> Self {
        tree.to_nested()
    }
}

impl TryFrom<Vec<AutomationRule>> for AutomationTree {
    type Error = ValidationError;

    fn try_from(rules: Vec<AutomationRule>) -> Result<Self, Self::Error> {
        Self::from_nested(rules)
    }
}
