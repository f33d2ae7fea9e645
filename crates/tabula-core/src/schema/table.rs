//! Table options and the validated schema.
//!
//! [`Table::validate`] is the single validation gate: every structural
//! invariant is checked eagerly, in a fixed order, and the resulting
//! [`Table`] is immutable. Later stages (statement synthesis, DDL rendering)
//! rely on those invariants without re-checking them.

use crate::error::{Error, Result};
use crate::schema::column::{Column, ColumnType};

/// Table-level options supplied alongside the column list.
///
/// The primary-key set and auto-increment column may be given here
/// explicitly, or implied by the per-column flags; an explicit option always
/// wins over the flags.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    table_name: String,
    primary_keys: Vec<String>,
    auto_increment: Option<String>,
    unique_keys: Vec<Vec<String>>,
    without_rowid: Option<bool>,
}

impl TableOptions {
    /// Creates options for the named table.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    /// Appends a single primary-key column.
    #[must_use]
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_keys.push(name.into());
        self
    }

    /// Appends an ordered list of primary-key columns.
    #[must_use]
    pub fn primary_keys<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_keys.extend(names.into_iter().map(Into::into));
        self
    }

    /// Names the auto-increment column.
    #[must_use]
    pub fn auto_increment(mut self, name: impl Into<String>) -> Self {
        self.auto_increment = Some(name.into());
        self
    }

    /// Appends a multi-column unique-key group.
    #[must_use]
    pub fn unique_key<I, S>(mut self, group: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_keys
            .push(group.into_iter().map(Into::into).collect());
        self
    }

    /// Explicitly enables or suppresses `WITHOUT ROWID` on the table.
    ///
    /// Left unset, the table definition carries `WITHOUT ROWID` whenever no
    /// auto-increment column is present. Enabling it on a table that also
    /// declares an auto-increment column fails validation: auto-increment
    /// requires the implicit rowid.
    #[must_use]
    pub const fn without_rowid(mut self, enabled: bool) -> Self {
        self.without_rowid = Some(enabled);
        self
    }
}

/// A validated, immutable table schema.
///
/// Constructed once via [`Table::validate`]; safely shared by reference
/// across any number of concurrent statement-generation calls.
#[derive(Debug, Clone)]
pub struct Table {
    table_name: String,
    columns: Vec<Column>,
    primary_keys: Vec<String>,
    auto_increment: Option<String>,
    unique_keys: Vec<Vec<String>>,
    without_rowid: Option<bool>,
}

impl Table {
    /// Validates the options and column list into an immutable schema.
    ///
    /// Checks run in a fixed order and short-circuit on the first failure:
    /// table name, primary-key set, column list, primary-key existence,
    /// auto-increment constraints, unique-key existence, and the
    /// auto-increment / `WITHOUT ROWID` exclusion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSchema`] when any structural invariant is
    /// violated.
    pub fn validate(options: TableOptions, columns: Vec<Column>) -> Result<Self> {
        if options.table_name.is_empty() {
            return Err(Error::InvalidSchema(String::from(
                "table_name must be a non-empty string",
            )));
        }

        let primary_keys = if options.primary_keys.is_empty() {
            columns
                .iter()
                .filter(|c| c.primary_key)
                .map(|c| c.name.clone())
                .collect()
        } else {
            options.primary_keys
        };
        if primary_keys.is_empty() || primary_keys.iter().any(String::is_empty) {
            return Err(Error::InvalidSchema(String::from(
                "primary_keys must name at least one column",
            )));
        }

        if columns.is_empty() {
            return Err(Error::InvalidSchema(String::from(
                "columns must not be empty",
            )));
        }

        let has_column = |name: &str| columns.iter().any(|c| c.name == name);
        for key in &primary_keys {
            if !has_column(key) {
                return Err(Error::InvalidSchema(format!(
                    "primary_keys includes a column that does not exist: {key}"
                )));
            }
        }

        let auto_increment = match options.auto_increment {
            Some(name) => Some(name),
            None => {
                let mut flagged = columns.iter().filter(|c| c.auto_increment);
                let first = flagged.next().map(|c| c.name.clone());
                if flagged.next().is_some() {
                    return Err(Error::InvalidSchema(String::from(
                        "auto_increment may only be declared on one column",
                    )));
                }
                first
            }
        };
        if let Some(name) = &auto_increment {
            if !primary_keys.iter().any(|k| k == name) {
                return Err(Error::InvalidSchema(format!(
                    "auto_increment column {name} must be a primary key"
                )));
            }
            if primary_keys.len() != 1 {
                return Err(Error::InvalidSchema(String::from(
                    "auto_increment requires a single primary key column",
                )));
            }
            let integer_typed = columns
                .iter()
                .any(|c| c.name == *name && c.column_type == ColumnType::Integer);
            if !integer_typed {
                return Err(Error::InvalidSchema(format!(
                    "auto_increment column {name} must have integer type"
                )));
            }
        }

        for group in &options.unique_keys {
            for name in group {
                if !has_column(name) {
                    return Err(Error::InvalidSchema(format!(
                        "unique_keys includes a column that does not exist: {name}"
                    )));
                }
            }
        }

        if auto_increment.is_some() && options.without_rowid == Some(true) {
            return Err(Error::InvalidSchema(String::from(
                "auto_increment requires rowid semantics and cannot be combined with without_rowid",
            )));
        }

        Ok(Self {
            table_name: options.table_name,
            columns,
            primary_keys,
            auto_increment,
            unique_keys: options.unique_keys,
            without_rowid: options.without_rowid,
        })
    }

    /// Returns the table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the resolved primary-key column names, in order.
    #[must_use]
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    /// Returns the auto-increment column name, if any.
    #[must_use]
    pub fn auto_increment(&self) -> Option<&str> {
        self.auto_increment.as_deref()
    }

    /// Returns the declared unique-key groups, in order.
    #[must_use]
    pub fn unique_keys(&self) -> &[Vec<String>] {
        &self.unique_keys
    }

    /// Renders the `CREATE TABLE` definition for this schema.
    ///
    /// Columns render in declaration order; the primary key renders inline
    /// on the auto-increment column, or as a trailing clause otherwise; each
    /// unique-key group becomes a trailing `UNIQUE` clause; `WITHOUT ROWID`
    /// is appended whenever no auto-increment column is present and the flag
    /// was not explicitly suppressed.
    #[must_use]
    pub fn create_table_definition(&self) -> String {
        let mut items: Vec<String> = Vec::with_capacity(self.columns.len() + 1);

        for col in &self.columns {
            let mut def = format!("{} {}", col.name, col.column_type.as_sql());
            if self.auto_increment.as_deref() == Some(col.name.as_str()) {
                def.push_str(" PRIMARY KEY AUTOINCREMENT");
            }
            if col.not_null {
                def.push_str(" NOT NULL");
            }
            if col.unique {
                def.push_str(" UNIQUE");
            }
            if let Some(default) = &col.default {
                def.push_str(" DEFAULT ");
                def.push_str(&default.to_literal());
            }
            items.push(def);
        }

        if self.auto_increment.is_none() {
            items.push(format!("PRIMARY KEY ({})", self.primary_keys.join(", ")));
        }
        for group in &self.unique_keys {
            items.push(format!("UNIQUE ({})", group.join(", ")));
        }

        let mut sql = format!("CREATE TABLE `{}` ({})", self.table_name, items.join(", "));
        if self.auto_increment.is_none() && self.without_rowid != Some(false) {
            sql.push_str(" WITHOUT ROWID");
        }
        sql
    }

    /// Renders the `DROP TABLE` statement for this schema.
    #[must_use]
    pub fn drop_table_sql(&self) -> String {
        format!("DROP TABLE `{}`", self.table_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::column::{integer, text};

    #[test]
    fn test_explicit_options_win_over_flags() {
        let table = Table::validate(
            TableOptions::new("events").primary_keys(["kind", "seq"]),
            vec![
                integer("seq").primary_key(),
                text("kind"),
                text("payload"),
            ],
        )
        .unwrap();
        assert_eq!(table.primary_keys(), ["kind", "seq"]);
    }

    #[test]
    fn test_flags_resolve_when_options_silent() {
        let table = Table::validate(
            TableOptions::new("users"),
            vec![integer("id").primary_key().auto_increment(), text("name")],
        )
        .unwrap();
        assert_eq!(table.primary_keys(), ["id"]);
        assert_eq!(table.auto_increment(), Some("id"));
    }

    #[test]
    fn test_two_auto_increment_flags_rejected() {
        let err = Table::validate(
            TableOptions::new("t").primary_keys(["a", "b"]),
            vec![
                integer("a").auto_increment(),
                integer("b").auto_increment(),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }
}
