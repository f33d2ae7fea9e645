//! Error types for schema validation and statement synthesis.

use thiserror::Error;

/// Errors raised while validating a schema or synthesizing a statement.
///
/// Both variants are synchronous precondition failures: nothing is retried,
/// and no partially-validated schema or partially-built statement is ever
/// observable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A structural invariant of the table schema is violated.
    ///
    /// Fatal to schema construction; there is no degraded schema.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A statement-generation argument is missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
