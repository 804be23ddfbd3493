//! # outreach-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **spam-check endpoint** (`/api/check-spam-content`) with a
//!   permissive CORS policy so browser clients can call it directly
//! - Serve a JSON API for campaign drafts and their **automation rule
//!   forest** (`/api/campaigns`, `/api/campaigns/{id}/automations`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `outreach-app` (for port traits and services) and
//! `outreach-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
