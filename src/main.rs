//! Pagination demo server
//!
//! Serves `GET /items` (offset pagination) and `GET /feed` (cursor
//! pagination), echoing the normalized parameters. Reads configuration from
//! `$PAGINATION_CONFIG` or ~/.config/query-pagination/config.toml.

use tracing::{error, info};

use query_pagination::server::{init_tracing, serve};
use query_pagination::{default_config_path, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("PAGINATION_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg.logging);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    info!(
        offset_max_limit = config.offset.max_limit,
        cursor_max_limit = config.cursor.max_limit,
        "Starting pagination demo..."
    );

    serve(config).await?;
    Ok(())
}
