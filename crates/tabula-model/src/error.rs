//! Error types for the model façade.

use thiserror::Error;

/// Errors surfaced by [`crate::Model`] operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Schema validation or statement synthesis failed.
    #[error(transparent)]
    Core(#[from] tabula_core::Error),

    /// The caller requested a capability this façade deliberately does not
    /// support, such as the "alter" table-creation strategy.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// The injected executor reported a database-side failure.
    #[error("executor error: {0}")]
    Executor(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
