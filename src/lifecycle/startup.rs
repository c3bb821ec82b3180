//! Startup orchestration.
//!
//! Validate, then build subsystems in dependency order, then bind the
//! listener last so traffic only arrives once everything is ready. Any
//! error is fatal.

use tokio::net::TcpListener;

use crate::config::{validate_config, ConfigError, ServiceConfig};
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::youtube::YouTubeError;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build YouTube client: {0}")]
    Client(#[from] YouTubeError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Prepare a server and its listener from a complete configuration.
pub async fn start(config: ServiceConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_url = %config.youtube.base_url,
        upstream_timeout_ms = config.youtube.timeout_ms,
        request_timeout_secs = config.timeouts.request_secs,
        segment = %config.tracing.fallback_name,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let server = HttpServer::from_config(config)?;

    let address = server.config().listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    Ok((server, listener))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;

    #[tokio::test]
    async fn refuses_to_start_without_credential() {
        let err = start(ServiceConfig::default()).await.unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
    }

    #[tokio::test]
    async fn binds_configured_address() {
        let mut config = ServiceConfig::default();
        config.youtube.api_key = ApiKey::new("key");
        config.listener.bind_address = "127.0.0.1:0".into();

        let (_server, listener) = start(config).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }
}
