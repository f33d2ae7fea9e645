//! Executor capability interface.
//!
//! The façade never owns a database connection: the caller injects anything
//! that can prepare, bind, and execute statements. The two traits here are
//! the full contract: an executor that satisfies the bounds is, by
//! construction, capable of everything the façade will ask of it
//! (`prepare`, `exec`, `batch`, `dump`).

use tabula_core::Value;

/// A database handle capable of preparing and executing statements.
#[allow(async_fn_in_trait)]
pub trait Executor {
    /// Prepared-statement handle produced by [`Executor::prepare`].
    type Statement: PreparedStatement<Error = Self::Error>;
    /// Database-side error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Prepares a statement from SQL text.
    fn prepare(&self, sql: &str) -> Self::Statement;

    /// Executes raw SQL directly; used only for DDL (CREATE/DROP TABLE).
    async fn exec(&self, sql: &str) -> Result<(), Self::Error>;

    /// Submits several prepared statements atomically.
    async fn batch(&self, statements: Vec<Self::Statement>) -> Result<(), Self::Error>;

    /// Returns a serialized snapshot of the entire database.
    async fn dump(&self) -> Result<Vec<u8>, Self::Error>;
}

/// A prepared statement awaiting bindings and execution.
#[allow(async_fn_in_trait)]
pub trait PreparedStatement: Sized {
    /// The executor-defined row envelope.
    type Row;
    /// Database-side error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Binds positional values, replacing any previous bindings.
    #[must_use]
    fn bind(self, values: Vec<Value>) -> Self;

    /// Executes without reading rows back.
    async fn run(self) -> Result<(), Self::Error>;

    /// Executes and returns the first row, if any.
    async fn first(self) -> Result<Option<Self::Row>, Self::Error>;

    /// Executes and returns every row.
    async fn all(self) -> Result<Vec<Self::Row>, Self::Error>;
}

/// Row type produced by an executor's prepared statements.
pub type ExecutorRow<E> = <<E as Executor>::Statement as PreparedStatement>::Row;
