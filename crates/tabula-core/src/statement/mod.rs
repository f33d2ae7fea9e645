//! Statement synthesis.
//!
//! [`generate`] compiles a [`Clauses`] bundle into a [`Statement`]: SQL text
//! with positional `?` placeholders plus the ordered binding list. Column
//! and table names are trusted identifiers and are concatenated directly;
//! values are only ever bound, never interpolated.
//!
//! # Example
//!
//! ```rust
//! use tabula_core::statement::{generate, Clauses, StatementKind};
//! use tabula_core::Value;
//!
//! let stmt = generate(
//!     StatementKind::Select,
//!     "users",
//!     &Clauses::new().where_eq("id", 1).limit(1),
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(stmt.query, "SELECT * FROM `users` WHERE id = ? LIMIT 1");
//! assert_eq!(stmt.bindings, vec![Value::Int(1)]);
//! ```

mod order;

pub use order::OrderSpec;

use crate::error::{Error, Result};
use crate::value::{ToValue, Value};

/// The statement kinds the synthesizer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `SELECT * FROM …`.
    Select,
    /// `INSERT INTO …`.
    Insert,
    /// `INSERT OR REPLACE INTO …`.
    InsertOrReplace,
    /// `UPDATE … SET …`.
    Update,
    /// `DELETE FROM …`.
    Delete,
    /// `INSERT … ON CONFLICT … DO UPDATE SET …`.
    Upsert,
}

/// The column set named by an upsert's `ON CONFLICT` clause.
///
/// Built from a single column name or an ordered list; the model façade
/// defaults it to the schema's primary-key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictTarget(Vec<String>);

impl ConflictTarget {
    /// Creates a single-column conflict target.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Creates a conflict target over an ordered column list.
    #[must_use]
    pub fn columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_sql(&self) -> String {
        self.0.join(", ")
    }
}

impl From<&str> for ConflictTarget {
    fn from(name: &str) -> Self {
        Self::column(name)
    }
}

impl From<String> for ConflictTarget {
    fn from(name: String) -> Self {
        Self::column(name)
    }
}

/// A per-call clause bundle.
///
/// Every field is independently optional; which combinations are legal
/// depends on the statement kind (see [`generate`]). The bundle is ephemeral
/// and carries no identity beyond the single generation call.
#[derive(Debug, Clone, Default)]
pub struct Clauses {
    where_eq: Vec<(String, Value)>,
    data: Vec<(String, Value)>,
    on_conflict_update: Vec<(String, Value)>,
    order_by: Vec<OrderSpec>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Clauses {
    /// Creates an empty clause bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality filter; filters conjoin with `AND`.
    ///
    /// A bundle with no filters means "no filter" on select and delete, not
    /// an always-false predicate.
    #[must_use]
    pub fn where_eq(mut self, column: impl Into<String>, value: impl ToValue) -> Self {
        self.where_eq.push((column.into(), value.to_value()));
        self
    }

    /// Adds a column/value pair for insert, update, or the upsert insert
    /// payload.
    #[must_use]
    pub fn data(mut self, column: impl Into<String>, value: impl ToValue) -> Self {
        self.data.push((column.into(), value.to_value()));
        self
    }

    /// Adds a column/value pair applied only on the upsert conflict branch.
    #[must_use]
    pub fn on_conflict_update(mut self, column: impl Into<String>, value: impl ToValue) -> Self {
        self.on_conflict_update.push((column.into(), value.to_value()));
        self
    }

    /// Appends an ORDER BY key.
    #[must_use]
    pub fn order_by(mut self, spec: impl Into<OrderSpec>) -> Self {
        self.order_by.push(spec.into());
        self
    }

    /// Sets the LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the OFFSET.
    ///
    /// An offset is only emitted when a limit is also present.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

/// A generated statement: SQL text plus its positional bindings.
///
/// `bindings[i]` corresponds to the i-th `?` in `query`, left to right. The
/// pair is handed as-is to the external executor.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// SQL text with `?` placeholders.
    pub query: String,
    /// Values for the placeholders, in order.
    pub bindings: Vec<Value>,
}

/// Synthesizes a statement of the given kind against the named table.
///
/// The synthesizer is a pure function: no I/O, no state between calls.
/// Only `Upsert` consumes the conflict target; the façade defaults it to
/// the schema's primary keys.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when the table name is empty or a
/// kind-mandatory clause is missing: `data` for the insert kinds and
/// update; `data`, `on_conflict_update`, `where_eq`, and a conflict target
/// for upsert.
pub fn generate(
    kind: StatementKind,
    table: &str,
    clauses: &Clauses,
    conflict_target: Option<&ConflictTarget>,
) -> Result<Statement> {
    if table.is_empty() {
        return Err(Error::InvalidArgument(String::from("Invalid table name")));
    }

    match kind {
        StatementKind::Select => Ok(generate_select(table, clauses)),
        StatementKind::Delete => Ok(generate_delete(table, clauses)),
        StatementKind::Insert => generate_insert(table, clauses, false),
        StatementKind::InsertOrReplace => generate_insert(table, clauses, true),
        StatementKind::Update => generate_update(table, clauses),
        StatementKind::Upsert => generate_upsert(table, clauses, conflict_target),
    }
}

fn generate_select(table: &str, clauses: &Clauses) -> Statement {
    let mut query = format!("SELECT * FROM `{table}`");
    let mut bindings = Vec::new();

    push_where(&mut query, &mut bindings, &clauses.where_eq);

    if !clauses.order_by.is_empty() {
        query.push_str(" ORDER BY ");
        query.push_str(&order::render_order_by(&clauses.order_by));
    }

    if let Some(limit) = clauses.limit {
        query.push_str(&format!(" LIMIT {limit}"));
        if let Some(offset) = clauses.offset {
            query.push_str(&format!(" OFFSET {offset}"));
        }
    }

    Statement { query, bindings }
}

fn generate_delete(table: &str, clauses: &Clauses) -> Statement {
    let mut query = format!("DELETE FROM `{table}`");
    let mut bindings = Vec::new();
    push_where(&mut query, &mut bindings, &clauses.where_eq);
    Statement { query, bindings }
}

fn generate_insert(table: &str, clauses: &Clauses, or_replace: bool) -> Result<Statement> {
    if clauses.data.is_empty() {
        return Err(Error::InvalidArgument(String::from(
            "Must provide data to insert",
        )));
    }

    let verb = if or_replace {
        "INSERT OR REPLACE INTO"
    } else {
        "INSERT INTO"
    };
    let query = format!(
        "{verb} `{table}` ({}) VALUES ({})",
        column_list(&clauses.data),
        placeholders(clauses.data.len())
    );
    let bindings = clauses.data.iter().map(|(_, v)| v.clone()).collect();

    Ok(Statement { query, bindings })
}

fn generate_update(table: &str, clauses: &Clauses) -> Result<Statement> {
    if clauses.data.is_empty() {
        return Err(Error::InvalidArgument(String::from(
            "Must provide data to update",
        )));
    }

    let mut query = format!("UPDATE `{table}` SET {}", assignments(&clauses.data));
    let mut bindings: Vec<Value> = clauses.data.iter().map(|(_, v)| v.clone()).collect();
    push_where(&mut query, &mut bindings, &clauses.where_eq);

    Ok(Statement { query, bindings })
}

fn generate_upsert(
    table: &str,
    clauses: &Clauses,
    conflict_target: Option<&ConflictTarget>,
) -> Result<Statement> {
    if clauses.data.is_empty()
        || clauses.on_conflict_update.is_empty()
        || clauses.where_eq.is_empty()
    {
        return Err(Error::InvalidArgument(String::from(
            "Must provide data to insert with, data to update with, and where keys in Upsert",
        )));
    }
    let conflict = match conflict_target {
        Some(target) if !target.is_empty() => target,
        _ => {
            return Err(Error::InvalidArgument(String::from(
                "Upsert requires a conflict target column",
            )))
        }
    };

    let mut query = format!(
        "INSERT INTO `{table}` ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {}",
        column_list(&clauses.data),
        placeholders(clauses.data.len()),
        conflict.as_sql(),
        assignments(&clauses.on_conflict_update)
    );
    let mut bindings: Vec<Value> = clauses.data.iter().map(|(_, v)| v.clone()).collect();
    bindings.extend(clauses.on_conflict_update.iter().map(|(_, v)| v.clone()));
    push_where(&mut query, &mut bindings, &clauses.where_eq);

    Ok(Statement { query, bindings })
}

/// Appends ` WHERE a = ? AND b = ?` and its bindings; a no-op for an empty
/// filter set.
fn push_where(query: &mut String, bindings: &mut Vec<Value>, filters: &[(String, Value)]) {
    if filters.is_empty() {
        return;
    }
    query.push_str(" WHERE ");
    for (i, (column, value)) in filters.iter().enumerate() {
        if i > 0 {
            query.push_str(" AND ");
        }
        query.push_str(column);
        query.push_str(" = ?");
        bindings.push(value.clone());
    }
}

fn column_list(pairs: &[(String, Value)]) -> String {
    pairs
        .iter()
        .map(|(c, _)| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn assignments(pairs: &[(String, Value)]) -> String {
    pairs
        .iter()
        .map(|(c, _)| format!("{c} = ?"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
