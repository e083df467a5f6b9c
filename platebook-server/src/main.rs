//! Platebook recipe API server

use anyhow::Context;
use platebook_server::{init_tracing, open_stores, AppState, PlatebookServer, ServerConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    init_tracing(config.log_format);

    info!("Starting Platebook server {}", env!("CARGO_PKG_VERSION"));

    let key = config.signing_key()?;
    let stores = open_stores(&config).context("Failed to open storage")?;
    let state = AppState::new(stores, key);

    let server = PlatebookServer::bind(config.bind, state)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    server
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
