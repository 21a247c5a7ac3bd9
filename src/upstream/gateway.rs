//! HTTP client for the explorer API.
//!
//! # Responsibilities
//! - Build the outbound URL for a query
//! - Attach a rotated `User-Agent` to every call
//! - Turn the response into `UpstreamResult`
//!
//! One GET per lookup. No retries, no caching.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::identity::IdentityRotator;
use crate::observability::metrics;
use crate::upstream::query::Query;
use crate::upstream::types::{UpstreamError, UpstreamResult};

/// Gateway to the explorer API. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamGateway {
    client: Client,
    base_url: Url,
    identities: IdentityRotator,
}

impl UpstreamGateway {
    /// Create a gateway for `config.base_url` using `identities` for the
    /// `User-Agent` header.
    pub fn new(config: &UpstreamConfig, identities: IdentityRotator) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(UpstreamError::Client)?;

        Ok(Self {
            client,
            base_url,
            identities,
        })
    }

    /// Look up an address (`/api/v2/address/{address}?details=txs`).
    pub async fn fetch_address(&self, address: &str) -> UpstreamResult {
        self.fetch(&Query::Address(address.to_string())).await
    }

    /// Look up a transaction (`/api/v2/tx/{txid}?page=1`).
    pub async fn fetch_transaction(&self, txid: &str) -> UpstreamResult {
        self.fetch(&Query::Transaction(txid.to_string())).await
    }

    /// Run a lookup, folding every failure into `UpstreamResult::Absent`.
    pub async fn fetch(&self, query: &Query) -> UpstreamResult {
        let start = Instant::now();
        match self.try_fetch(query).await {
            Ok(body) => {
                metrics::record_upstream(query.kind(), "present", start);
                UpstreamResult::Present(body)
            }
            Err(e) => {
                tracing::warn!(
                    kind = query.kind(),
                    value = %query.value(),
                    error = %e,
                    "Upstream lookup failed"
                );
                metrics::record_upstream(query.kind(), e.outcome(), start);
                UpstreamResult::Absent
            }
        }
    }

    /// Run a lookup and report why it failed.
    pub async fn try_fetch(&self, query: &Query) -> Result<Value, UpstreamError> {
        let url = query.upstream_url(&self.base_url);
        let identity = self.identities.choose();

        tracing::debug!(kind = query.kind(), url = %url, user_agent = identity, "Forwarding lookup");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, identity)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        response.json::<Value>().await.map_err(UpstreamError::Decode)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
