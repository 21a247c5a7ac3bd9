//! Configuration schema definitions.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! reference deployment: listen on port 9000 and forward to btcbook.guarda.co.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream explorer API and outbound identities.
    pub upstream: UpstreamConfig,

    /// Static descriptor served on `GET /`.
    pub descriptor: DescriptorConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:9000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9000".to_string(),
        }
    }
}

/// Upstream explorer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme and host of the explorer API, without the `/api/v2` part.
    pub base_url: String,

    /// Total request timeout in seconds. `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,

    /// `User-Agent` values rotated across outbound calls. Must not be empty.
    pub identities: Vec<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://btcbook.guarda.co".to_string(),
            timeout_secs: None,
            identities: default_identities(),
        }
    }
}

fn default_identities() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/237.84.2.178 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:106.0) Gecko/20100101 Firefox/106.0",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/237.84.2.178 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Safari/605.1.15",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/237.84.2.178 Safari/537.36",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Fields of the service descriptor returned by the index endpoint.
///
/// The advertised port is not configured here; it is taken from the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DescriptorConfig {
    pub name: String,
    pub run: String,
    pub stream: bool,
    pub datasets: bool,
    pub api: bool,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            name: "BlockHub".to_string(),
            run: "./route.sh".to_string(),
            stream: true,
            datasets: true,
            api: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
