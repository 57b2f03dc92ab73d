//! prompt-relay: streaming prompt relay over an OpenAI-compatible LLM API.
//!
//! Accepts a text idea plus image style presets over HTTP, expands them
//! into a generation prompt by template substitution, forwards the prompt
//! to a configured completion endpoint, and streams the model's incremental
//! output back to the caller as Server-Sent Events.
//!
//! Reasoning-capable models have their thinking tokens stripped from the
//! visible stream before framing.

pub mod config;
pub mod prompt;
pub mod provider;
pub mod server;
