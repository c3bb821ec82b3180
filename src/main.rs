//! YouTube title proxy.
//!
//! ```text
//!     Client Request ─▶ request id ─▶ trace segment ─▶ handler ─▶ YouTube Data API
//!     Client Response ◀──────────── title / 404 / 500 ◀──────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use youtube_title_proxy::config::{read_config, ApiKey, ServiceConfig};
use youtube_title_proxy::lifecycle::{self, Shutdown};
use youtube_title_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "youtube-title-proxy")]
#[command(about = "Relays YouTube video titles over HTTP", long_about = None)]
struct Cli {
    /// Google Cloud Platform API credential.
    #[arg(long = "apikey", env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address.
    #[arg(short, long)]
    bind: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ServiceConfig::default(),
        };
        if let Some(key) = self.api_key {
            config.youtube.api_key = ApiKey::new(key);
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability);
    tracing::info!("youtube-title-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let (server, listener) = lifecycle::start(config).await?;

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
