//! # tabula-core
//!
//! Schema validation and SQL statement synthesis for SQLite-shaped
//! databases.
//!
//! A table schema is declared once and validated eagerly into an immutable
//! [`schema::Table`]; per-call [`statement::Clauses`] bundles then compile
//! into [`statement::Statement`] values (SQL text with positional `?`
//! placeholders plus the ordered bindings) for select, insert,
//! insert-or-replace, update, delete, and upsert.
//!
//! Both halves are pure, synchronous computations over immutable inputs: a
//! validated schema is safely shared by reference across concurrent
//! generation calls, and executing the generated statements is entirely the
//! caller's concern.
//!
//! ```rust
//! use tabula_core::schema::{integer, text, Table, TableOptions};
//! use tabula_core::statement::{generate, Clauses, StatementKind};
//!
//! let table = Table::validate(
//!     TableOptions::new("users"),
//!     vec![integer("id").primary_key().auto_increment(), text("name").not_null()],
//! )?;
//!
//! assert_eq!(
//!     table.create_table_definition(),
//!     "CREATE TABLE `users` (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)"
//! );
//!
//! let stmt = generate(
//!     StatementKind::Insert,
//!     table.table_name(),
//!     &Clauses::new().data("id", 1).data("name", "alice"),
//!     None,
//! )?;
//! assert_eq!(stmt.query, "INSERT INTO `users` (id, name) VALUES (?, ?)");
//! # Ok::<(), tabula_core::Error>(())
//! ```

pub mod error;
pub mod schema;
pub mod statement;
pub mod value;

pub use error::{Error, Result};
pub use statement::{generate, Clauses, ConflictTarget, OrderSpec, Statement, StatementKind};
pub use value::{ToValue, Value};
