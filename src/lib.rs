//! BlockHub lookup proxy library.

pub mod config;
pub mod http;
pub mod identity;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use identity::IdentityRotator;
pub use lifecycle::Shutdown;
pub use upstream::{Query, UpstreamGateway, UpstreamResult};
