//! Column descriptors and canonical column types.
//!
//! Spelling aliases ("int", "varchar", "bool", …) are folded to a canonical
//! [`ColumnType`] exactly once, when the column is defined. Everything
//! downstream (validation, DDL rendering) only ever sees canonical types.

use std::str::FromStr;

use crate::error::Error;
use crate::value::{ToValue, Value};

/// Canonical column type after alias resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Integer affinity.
    Integer,
    /// Text affinity.
    Text,
    /// Floating-point affinity.
    Real,
    /// Binary blob.
    Blob,
    /// Boolean, stored with integer affinity.
    Boolean,
}

impl ColumnType {
    /// Returns the SQL keyword for this type.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
            Self::Real => "REAL",
            Self::Blob => "BLOB",
            Self::Boolean => "BOOLEAN",
        }
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    /// Resolves a type spelling, including common aliases, to its canonical
    /// type.
    fn from_str(spelling: &str) -> Result<Self, Error> {
        match spelling.to_ascii_lowercase().as_str() {
            "integer" | "int" | "bigint" | "smallint" | "tinyint" => Ok(Self::Integer),
            "text" | "string" | "varchar" | "char" | "clob" => Ok(Self::Text),
            "real" | "float" | "double" | "numeric" | "decimal" => Ok(Self::Real),
            "blob" | "binary" | "varbinary" => Ok(Self::Blob),
            "boolean" | "bool" => Ok(Self::Boolean),
            other => Err(Error::InvalidSchema(format!(
                "unknown column type: {other}"
            ))),
        }
    }
}

/// A single column descriptor.
///
/// Columns are declared with the shorthand constructors and a fluent API:
///
/// ```rust
/// use tabula_core::schema::{integer, text};
///
/// let id = integer("id").primary_key().auto_increment();
/// let name = text("name").not_null().default_value("anonymous");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) column_type: ColumnType,
    pub(crate) primary_key: bool,
    pub(crate) not_null: bool,
    pub(crate) unique: bool,
    pub(crate) auto_increment: bool,
    pub(crate) default: Option<Value>,
}

impl Column {
    /// Creates a column with the given name and canonical type.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            primary_key: false,
            not_null: false,
            unique: false,
            auto_increment: false,
            default: None,
        }
    }

    /// Marks the column as part of the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Adds a standalone UNIQUE constraint on this column.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks the column as auto-incrementing.
    ///
    /// Validation requires such a column to be the sole integer primary key.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the column's default value.
    #[must_use]
    pub fn default_value(mut self, value: impl ToValue) -> Self {
        self.default = Some(value.to_value());
        self
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the canonical column type.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }
}

/// Creates an INTEGER column.
#[must_use]
pub fn integer(name: impl Into<String>) -> Column {
    Column::new(name, ColumnType::Integer)
}

/// Creates a TEXT column.
#[must_use]
pub fn text(name: impl Into<String>) -> Column {
    Column::new(name, ColumnType::Text)
}

/// Creates a REAL column.
#[must_use]
pub fn real(name: impl Into<String>) -> Column {
    Column::new(name, ColumnType::Real)
}

/// Creates a BLOB column.
#[must_use]
pub fn blob(name: impl Into<String>) -> Column {
    Column::new(name, ColumnType::Blob)
}

/// Creates a BOOLEAN column.
#[must_use]
pub fn boolean(name: impl Into<String>) -> Column {
    Column::new(name, ColumnType::Boolean)
}
