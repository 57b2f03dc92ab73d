//! prompt-relay: streaming prompt relay over an OpenAI-compatible LLM API.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use prompt_relay::config::{Cli, Config};
use prompt_relay::provider::CompletionClient;
use prompt_relay::server::api::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing/logging.
    let filter = if cli.verbose {
        "prompt_relay=debug,tower_http=debug"
    } else {
        "prompt_relay=info,tower_http=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_target(true)
        .init();

    info!("prompt-relay v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from the environment.
    let config = Arc::new(Config::from_env(&cli));

    info!(
        base_url = %config.provider.base_url,
        model = %config.provider.default_model,
        api_key_set = config.provider.api_key.is_some(),
        "Configuration loaded"
    );

    // Build application state.
    let state = Arc::new(AppState {
        client: CompletionClient::new(config.clone()),
        config: config.clone(),
        start_time: Instant::now(),
    });

    // Build the HTTP router.
    let app = build_router(state);

    // Start the server.
    let listen_addr = config.server.listen.clone();
    info!(addr = %listen_addr, "Starting server");

    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Listening on {listen_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
