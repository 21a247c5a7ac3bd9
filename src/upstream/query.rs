//! Lookup queries and their upstream URLs.

use url::Url;

/// One lookup against the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Address(String),
    Transaction(String),
}

impl Query {
    /// Resolve the query from the `address` and `txid` parameters.
    ///
    /// `address` takes priority when both are given. Empty values count as
    /// missing. Returns `None` when neither parameter is usable.
    pub fn from_params(address: Option<String>, txid: Option<String>) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());

        present(address)
            .map(Query::Address)
            .or_else(|| present(txid).map(Query::Transaction))
    }

    /// Label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Query::Address(_) => "address",
            Query::Transaction(_) => "transaction",
        }
    }

    /// The caller-supplied value, unvalidated.
    pub fn value(&self) -> &str {
        match self {
            Query::Address(v) | Query::Transaction(v) => v,
        }
    }

    /// Build the explorer URL under `base`.
    ///
    /// `base` must be able to carry a path (any http(s) URL). The value becomes
    /// a single percent-encoded path segment.
    pub fn upstream_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let (resource, query) = match self {
            Query::Address(_) => ("address", "details=txs"),
            Query::Transaction(_) => ("tx", "page=1"),
        };

        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v2", resource, self.value()]);
        }
        url.set_query(Some(query));
        url
    }
}
