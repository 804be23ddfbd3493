//! # outreach-domain
//!
//! Pure domain model for the outreach campaign tool.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Campaign drafts** (name, channel, subject, content, schedule)
//! - Define the **Automation rule forest** (follow-up rules nested to any depth)
//!   and its add / update / delete operations
//! - Define the **Spam check** request and verdict types
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod automation;
pub mod campaign;
pub mod spam;
