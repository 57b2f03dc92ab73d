//! Upstream completion provider client.
//!
//! - [`client`]: Streaming chat-completion client and provider events
//! - [`models`]: Per-model capability table
//! - [`reasoning`]: Streaming reasoning-tag extraction

pub mod client;
pub mod models;
pub mod reasoning;

pub use client::{CompletionClient, ProviderEvent};
