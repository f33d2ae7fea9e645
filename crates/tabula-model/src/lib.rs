//! # tabula-model
//!
//! A thin model façade over [`tabula_core`]: one validated schema, one
//! injected database executor, and the per-kind operations between them.
//!
//! The façade holds no database state of its own. Callers supply any type
//! implementing the [`Executor`] and [`PreparedStatement`] capability
//! traits; every generated statement reaches it as
//! `prepare(query).bind(bindings)` with the bindings passed positionally
//! and untouched. Table creation supports a plain and a force (drop-first)
//! strategy; the "alter" strategy is deliberately unsupported and fails
//! with [`ModelError::NotImplemented`].

pub mod error;
pub mod executor;
pub mod model;

pub use error::{ModelError, Result};
pub use executor::{Executor, ExecutorRow, PreparedStatement};
pub use model::{CreateStrategy, Model};
