//! services/engine/src/error.rs
//!
//! Defines the primary error type for the entire engine service.

use crate::config::ConfigError;
use recall_core::ports::{PortError, UpstreamError};

/// The primary error type for the `engine` service.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Represents an error that occurred during configuration loading.
    /// Fatal: the process cannot serve generation requests at all.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    /// `NotFound` covers both a missing resource and a resource owned by
    /// another user; the two are deliberately indistinguishable.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// The generative endpoint returned a non-success response or was
    /// unreachable. The upstream status and body ride along for diagnostics.
    #[error("Upstream generation error: {0}")]
    Upstream(#[from] UpstreamError),

    /// The endpoint answered successfully but its text could not be parsed
    /// into flashcard drafts.
    #[error("Malformed generation output: {0}")]
    MalformedOutput(String),

    /// A caller-supplied value was out of its allowed range; rejected
    /// before any I/O happens.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller cancelled a generation call before the model responded.
    /// Nothing was persisted.
    #[error("Generation cancelled")]
    Cancelled,

    /// Represents a standard Input/Output error (e.g., reading a source file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Whether retrying the same call may succeed. Upstream failures and
    /// malformed model output are transient: a retry can reach a healthy
    /// endpoint or get a better-formatted response.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::MalformedOutput(_))
    }
}
