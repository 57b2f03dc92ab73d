//! Runtime configuration for prompt-relay.
//!
//! Provider settings (upstream URL, credential, forced model) come from
//! environment variables read once at startup; the resulting `Config` is
//! immutable and shared behind an `Arc` for the life of the process.

use clap::Parser;
use serde::Serialize;

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "prompt-relay", about = "Streaming prompt relay for an OpenAI-compatible LLM API")]
pub struct Cli {
    /// HTTP listen address.
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Upstream provider settings.
    pub provider: ProviderConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g. "0.0.0.0:8080").
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream completion provider settings.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,

    /// Bearer credential for the upstream API (optional).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model id used for every upstream call. Caller-supplied model hints
    /// are discarded; this value always wins.
    pub default_model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://text.pollinations.ai/openai".to_string(),
            api_key: None,
            default_model: "openai".to_string(),
        }
    }
}

impl Config {
    /// Build configuration from the process environment, falling back to
    /// defaults for anything unset.
    ///
    /// Recognized variables:
    /// - `AI_PROVIDER_BASE_URL`
    /// - `AI_PROVIDER_API_KEY`, then `POLLINATIONS_AI_API_KEY`
    /// - `AI_PROVIDER_DEFAULT_MODEL`
    pub fn from_env(cli: &Cli) -> Self {
        let mut config = Config::default();
        config.server.listen = cli.listen.clone();

        if let Ok(url) = std::env::var("AI_PROVIDER_BASE_URL") {
            if !url.is_empty() {
                config.provider.base_url = url.trim_end_matches('/').to_string();
            }
        }

        config.provider.api_key = std::env::var("AI_PROVIDER_API_KEY")
            .or_else(|_| std::env::var("POLLINATIONS_AI_API_KEY"))
            .ok()
            .filter(|key| !key.is_empty());

        if let Ok(model) = std::env::var("AI_PROVIDER_DEFAULT_MODEL") {
            if !model.is_empty() {
                config.provider.default_model = model;
            }
        }

        config
    }

    /// Full URL of the upstream chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.provider.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.provider.base_url, "https://text.pollinations.ai/openai");
        assert_eq!(cfg.provider.default_model, "openai");
        assert!(cfg.provider.api_key.is_none());
    }

    #[test]
    fn test_completions_url() {
        let cfg = Config::default();
        assert_eq!(
            cfg.completions_url(),
            "https://text.pollinations.ai/openai/chat/completions"
        );
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut cfg = Config::default();
        cfg.provider.api_key = Some("secret".to_string());
        let rendered = serde_json::to_string(&cfg).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
