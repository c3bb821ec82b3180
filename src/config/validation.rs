//! Configuration validation.
//!
//! Serde handles the syntactic side; this module checks values. All errors
//! are collected so a bad config file is reported in one pass.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("youtube.api_key is required")]
    MissingApiKey,

    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid youtube.base_url '{0}': expected an http(s) URL")]
    InvalidBaseUrl(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("tracing.sample_rate must be within 0.0..=1.0, got {0}")]
    SampleRateOutOfRange(String),

    #[error("tracing.fallback_name must not be empty")]
    EmptySegmentName,

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.youtube.api_key.is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match url::Url::parse(&config.youtube.base_url) {
        Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.youtube.base_url.clone())),
    }

    if config.youtube.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("youtube.timeout_ms"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    let rate = config.tracing.sample_rate;
    if !(0.0..=1.0).contains(&rate) {
        errors.push(ValidationError::SampleRateOutOfRange(rate.to_string()));
    }

    if config.tracing.fallback_name.trim().is_empty() {
        errors.push(ValidationError::EmptySegmentName);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ApiKey;

    fn valid() -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.youtube.api_key = ApiKey::new("key");
        config
    }

    #[test]
    fn default_with_key_is_valid() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn missing_key_rejected() {
        let errors = validate_config(&ServiceConfig::default()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingApiKey]);
    }

    #[test]
    fn collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-addr".into();
        config.youtube.base_url = "ftp://example.com".into();
        config.youtube.timeout_ms = 0;
        config.tracing.sample_rate = 1.5;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::MissingApiKey));
        assert!(errors.contains(&ValidationError::InvalidBindAddress("not-an-addr".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout("youtube.timeout_ms")));
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = valid();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidMetricsAddress("nope".into())]
        );
    }
}
