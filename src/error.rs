// Error kinds surfaced by the extraction engine.
//
// Normalization is total and never appears here. Everything that can fail
// lives in the extractors, the embedding backends, or configuration parsing.

use thiserror::Error;

/// Errors returned by keyword extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input produced no candidate terms to score.
    #[error("input has no candidate terms after cleaning")]
    EmptyInput,

    /// An embedding backend failed to load, run, or answer in time.
    #[error("embedding backend '{backend}' unavailable: {reason}")]
    BackendUnavailable {
        /// Identifier of the backend that failed.
        backend: String,
        /// Human-readable cause, including any underlying error chain.
        reason: String,
    },

    /// A strategy, backend, or numeric setting was rejected before any work ran.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ExtractError {
    /// Build a `BackendUnavailable` from any displayable cause.
    ///
    /// Uses the alternate formatter so an `anyhow` context chain is kept.
    pub fn backend(backend: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::BackendUnavailable {
            backend: backend.into(),
            reason: format!("{cause:#}"),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Whether a caller may reasonably retry the same request once.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
