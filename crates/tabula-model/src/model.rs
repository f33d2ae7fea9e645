//! The model façade.
//!
//! A [`Model`] pairs one validated [`Table`] schema with one injected
//! executor and exposes the per-kind operations. Every method is a
//! mechanical pass-through: synthesize a statement in the core, hand
//! `query` + `bindings` to the executor positionally and untouched.

use tracing::{debug, info};

use tabula_core::schema::Table;
use tabula_core::statement::{generate, Clauses, ConflictTarget, Statement, StatementKind};

use crate::error::{ModelError, Result};
use crate::executor::{Executor, ExecutorRow, PreparedStatement};

/// How [`Model::create_table`] treats an existing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateStrategy {
    /// Plain `CREATE TABLE`; fails downstream if the table already exists.
    #[default]
    Create,
    /// Drop any existing table first (`DROP TABLE IF EXISTS` prefix).
    Force,
    /// Reconcile an existing table in place. Unsupported: requesting it
    /// fails loudly with [`ModelError::NotImplemented`].
    Alter,
}

/// A table model bound to an injected executor.
///
/// # Example
///
/// ```rust,ignore
/// let table = Table::validate(
///     TableOptions::new("users"),
///     vec![integer("id").primary_key().auto_increment(), text("name").not_null()],
/// )?;
/// let users = Model::new(table, executor);
///
/// users.create_table(CreateStrategy::Create).await?;
/// users.insert_one(&Clauses::new().data("name", "alice")).await?;
/// let row = users.first(&Clauses::new().where_eq("id", 1)).await?;
/// ```
#[derive(Debug)]
pub struct Model<E: Executor> {
    schema: Table,
    executor: E,
}

impl<E: Executor> Model<E> {
    /// Binds a validated schema to an executor.
    pub fn new(schema: Table, executor: E) -> Self {
        Self { schema, executor }
    }

    /// Returns the validated schema.
    #[must_use]
    pub fn schema(&self) -> &Table {
        &self.schema
    }

    /// Creates the table according to the chosen strategy.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotImplemented`] for [`CreateStrategy::Alter`];
    /// [`ModelError::Executor`] when the executor rejects the DDL.
    pub async fn create_table(&self, strategy: CreateStrategy) -> Result<()> {
        let definition = self.schema.create_table_definition();
        let sql = match strategy {
            CreateStrategy::Create => definition,
            CreateStrategy::Force => format!(
                "DROP TABLE IF EXISTS `{}`; {definition}",
                self.schema.table_name()
            ),
            CreateStrategy::Alter => {
                return Err(ModelError::NotImplemented("alter table creation strategy"))
            }
        };
        info!(table = %self.schema.table_name(), "creating table");
        self.executor.exec(&sql).await.map_err(executor_error)
    }

    /// Drops the table.
    pub async fn drop_table(&self) -> Result<()> {
        info!(table = %self.schema.table_name(), "dropping table");
        self.executor
            .exec(&self.schema.drop_table_sql())
            .await
            .map_err(executor_error)
    }

    /// Selects and returns the first matching row, if any.
    pub async fn first(&self, clauses: &Clauses) -> Result<Option<ExecutorRow<E>>> {
        let stmt = self.statement(StatementKind::Select, clauses)?;
        self.prepared(&stmt).first().await.map_err(executor_error)
    }

    /// Selects and returns every matching row.
    pub async fn all(&self, clauses: &Clauses) -> Result<Vec<ExecutorRow<E>>> {
        let stmt = self.statement(StatementKind::Select, clauses)?;
        self.prepared(&stmt).all().await.map_err(executor_error)
    }

    /// Inserts one row from the bundle's `data` entries.
    pub async fn insert_one(&self, clauses: &Clauses) -> Result<()> {
        self.run(StatementKind::Insert, clauses).await
    }

    /// Inserts one row, replacing any conflicting existing row.
    pub async fn insert_or_replace(&self, clauses: &Clauses) -> Result<()> {
        self.run(StatementKind::InsertOrReplace, clauses).await
    }

    /// Inserts several rows atomically, one prepared statement per bundle,
    /// through the executor's `batch` capability.
    pub async fn insert_all(&self, rows: &[Clauses]) -> Result<()> {
        let mut statements = Vec::with_capacity(rows.len());
        for clauses in rows {
            let stmt = self.statement(StatementKind::Insert, clauses)?;
            statements.push(self.prepared(&stmt));
        }
        self.executor
            .batch(statements)
            .await
            .map_err(executor_error)
    }

    /// Updates matching rows with the bundle's `data` entries.
    pub async fn update(&self, clauses: &Clauses) -> Result<()> {
        self.run(StatementKind::Update, clauses).await
    }

    /// Deletes matching rows.
    pub async fn delete(&self, clauses: &Clauses) -> Result<()> {
        self.run(StatementKind::Delete, clauses).await
    }

    /// Upserts with the conflict target defaulted to the schema's primary
    /// keys.
    pub async fn upsert(&self, clauses: &Clauses) -> Result<()> {
        let target = ConflictTarget::columns(self.schema.primary_keys().iter().cloned());
        self.upsert_on(clauses, &target).await
    }

    /// Upserts with an explicit conflict target, for callers overriding the
    /// primary-key default.
    pub async fn upsert_on(&self, clauses: &Clauses, target: &ConflictTarget) -> Result<()> {
        let stmt = generate(
            StatementKind::Upsert,
            self.schema.table_name(),
            clauses,
            Some(target),
        )?;
        self.prepared(&stmt).run().await.map_err(executor_error)
    }

    async fn run(&self, kind: StatementKind, clauses: &Clauses) -> Result<()> {
        let stmt = self.statement(kind, clauses)?;
        self.prepared(&stmt).run().await.map_err(executor_error)
    }

    fn statement(&self, kind: StatementKind, clauses: &Clauses) -> Result<Statement> {
        Ok(generate(kind, self.schema.table_name(), clauses, None)?)
    }

    fn prepared(&self, stmt: &Statement) -> E::Statement {
        debug!(
            sql = %stmt.query,
            bindings = stmt.bindings.len(),
            "preparing statement"
        );
        self.executor
            .prepare(&stmt.query)
            .bind(stmt.bindings.clone())
    }
}

fn executor_error<E>(err: E) -> ModelError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ModelError::Executor(Box::new(err))
}
