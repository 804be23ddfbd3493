//! Automation: follow-up rules chained on recipient behaviour.
//!
//! A campaign owns an ordered forest of [`FollowUpRule`]s. Each rule says
//! "when the recipient does [`Trigger`], wait a [`TimeUnit`]-scaled delay,
//! then send a message", and may carry sub-rules that chain further
//! follow-ups off the message it sends. Nesting stops at [`MAX_DEPTH`] levels
//! so that a forest always survives a trip through its JSON form.

mod delay;
mod rule;
mod tree;
mod trigger;

pub use delay::TimeUnit;
pub use rule::{AutomationRule, FollowUpRule, RulePatch};
pub use tree::{AutomationTree, MAX_DEPTH};
pub use trigger::Trigger;
