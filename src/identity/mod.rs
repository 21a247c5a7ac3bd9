//! Identity rotation for outbound requests.
//!
//! # Data Flow
//! ```text
//! config.upstream.identities (startup, validated non-empty)
//!     → IdentityRotator (immutable list, shared via Arc)
//!     → selector.rs picks an index per outbound call
//!     → chosen string sent as the User-Agent header
//! ```
//!
//! # Design Decisions
//! - The list never changes after startup; only the selector has state
//! - Selection is behind the `Selector` trait so tests can fix the sequence

pub mod selector;

use std::sync::Arc;

use thiserror::Error;

pub use selector::{SeededSelector, Selector, SequenceSelector, ThreadRngSelector};

/// Errors raised while building a rotator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity list is empty")]
    Empty,
}

/// Fixed list of client identification strings with a pluggable selector.
#[derive(Clone)]
pub struct IdentityRotator {
    identities: Arc<[String]>,
    selector: Arc<dyn Selector>,
}

impl IdentityRotator {
    /// Build a rotator over `identities`, rejecting an empty list.
    pub fn new(
        identities: Vec<String>,
        selector: Arc<dyn Selector>,
    ) -> Result<Self, IdentityError> {
        if identities.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self {
            identities: identities.into(),
            selector,
        })
    }

    /// Build a rotator that picks uniformly at random.
    pub fn random(identities: Vec<String>) -> Result<Self, IdentityError> {
        Self::new(identities, Arc::new(ThreadRngSelector))
    }

    /// Pick the identity for the next outbound call.
    pub fn choose(&self) -> &str {
        let index = self.selector.pick(self.identities.len());
        // Selectors are trusted to stay in range; fall back to the first entry.
        self.identities
            .get(index)
            .unwrap_or(&self.identities[0])
            .as_str()
    }

    pub fn identities(&self) -> &[String] {
        &self.identities
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl std::fmt::Debug for IdentityRotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRotator")
            .field("identities", &self.identities.len())
            .finish_non_exhaustive()
    }
}
