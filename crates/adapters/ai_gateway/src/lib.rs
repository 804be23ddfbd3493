//! # outreach-adapter-ai-gateway
//!
//! Outbound adapter for a chat-completions AI gateway, built on
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement [`CompletionClient`](outreach_app::ports::CompletionClient)
//! - Authenticate with a bearer API key held as a [`secrecy::SecretString`]
//! - Map upstream statuses into [`CompletionError`](outreach_app::ports::CompletionError)
//!   (`429` → rate limited, `402` → payment required, anything else → status error)
//!
//! ## Dependency rule
//! Depends on `outreach-app` for the port trait. Never leaks reqwest types
//! across the port.

mod client;
mod config;
mod wire;

pub use client::GatewayClient;
pub use config::GatewayConfig;
