//! # outreach-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CampaignRepository`: CRUD for campaign drafts
//!   - `CompletionClient`: one chat-completion round trip to an AI gateway
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CampaignService`: draft CRUD and follow-up rule editing
//!   - `SpamCheckService`: classify subject + content, apply the
//!     fail-open / fail-closed policy
//!
//! ## Dependency rule
//! Depends on `outreach-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
