//! Upstream explorer gateway.
//!
//! # Data Flow
//! ```text
//! Query (address | txid)
//!     → query.rs (URL template under the configured base)
//!     → gateway.rs (GET with rotated User-Agent)
//!     → 200 + JSON      → UpstreamResult::Present
//!     → anything else   → UpstreamResult::Absent (reason logged)
//! ```
//!
//! # Design Decisions
//! - "Not found" and "unreachable" are indistinguishable to callers; the
//!   detailed `UpstreamError` is only visible through `try_fetch` and logs
//! - One pooled `reqwest::Client` per gateway

pub mod gateway;
pub mod query;
pub mod types;

pub use gateway::UpstreamGateway;
pub use query::Query;
pub use types::{UpstreamError, UpstreamResult};
