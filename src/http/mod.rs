//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign / propagate request ID)
//!     → lookup handler resolves address | txid
//!     → upstream gateway
//!     → response.rs (JSON passthrough or {"error": ...})
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{ApiError, ServiceDescriptor};
pub use server::{build_router, AppState, HttpServer, ServerError};
