//! # outreach-adapter-storage-memory
//!
//! In-memory persistence adapter.
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `outreach-app::ports`
//! - Keep drafts for the lifetime of the process; nothing is written to disk
//!
//! ## Dependency rule
//! Depends on `outreach-app` (for port traits) and `outreach-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod campaign_repo;

pub use campaign_repo::InMemoryCampaignRepository;
