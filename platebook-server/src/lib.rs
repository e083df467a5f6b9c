//! HTTP surface of the Platebook recipe API

pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod response;
pub mod server;
pub mod state;

pub use config::{Backend, LogFormat, ServerConfig};
pub use handlers::handle_request;
pub use server::PlatebookServer;
pub use state::AppState;

use platebook_core::store::Stores;
use platebook_engine::StorageEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }
}

/// Open the configured storage backend
pub fn open_stores(config: &ServerConfig) -> platebook_core::Result<Stores> {
    match config.backend {
        Backend::Memory => {
            info!("Using in-memory storage");
            Ok(Stores::in_memory())
        }
        Backend::Fjall => {
            if !config.data_dir.exists() {
                std::fs::create_dir_all(&config.data_dir)?;
                info!("Created data directory: {}", config.data_dir.display());
            }
            info!("Using fjall storage at {}", config.data_dir.display());
            StorageEngine::new(&config.data_dir)?.open_stores()
        }
    }
}
