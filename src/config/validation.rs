//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that addresses and the upstream URL parse
//! - Check that every identity can be sent as a header value
//!
//! Returns all validation errors, not just the first.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("upstream.base_url '{0}' is not an http(s) URL")]
    BaseUrl(String),

    #[error("upstream.identities must not be empty")]
    NoIdentities,

    #[error("upstream.identities[{0}] is not a valid header value")]
    Identity(usize),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => {}
        _ => errors.push(ValidationError::BaseUrl(config.upstream.base_url.clone())),
    }

    if config.upstream.identities.is_empty() {
        errors.push(ValidationError::NoIdentities);
    }
    for (i, identity) in config.upstream.identities.iter().enumerate() {
        if identity.is_empty() || HeaderValue::from_str(identity).is_err() {
            errors.push(ValidationError::Identity(i));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
