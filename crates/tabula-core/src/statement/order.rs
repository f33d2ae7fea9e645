//! ORDER BY normalization.
//!
//! An [`OrderSpec`] names a sort column with optional `DESC` and
//! `NULLS LAST` modifiers; ascending with nulls first is the default and
//! adds no suffix. Rendering is a stable, order-preserving transform over
//! the input list.

/// A single ORDER BY key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub(crate) column: String,
    pub(crate) descending: bool,
    pub(crate) nulls_last: bool,
}

impl OrderSpec {
    /// Creates an ascending, nulls-first sort on the column.
    #[must_use]
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
            nulls_last: false,
        }
    }

    /// Creates a descending sort on the column.
    #[must_use]
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
            nulls_last: false,
        }
    }

    /// Sorts NULL values after all non-NULL values.
    #[must_use]
    pub const fn nulls_last(mut self) -> Self {
        self.nulls_last = true;
        self
    }

    fn render(&self) -> String {
        let mut sql = format!("\"{}\"", self.column);
        if self.descending {
            sql.push_str(" DESC");
        }
        if self.nulls_last {
            sql.push_str(" NULLS LAST");
        }
        sql
    }
}

impl From<&str> for OrderSpec {
    fn from(column: &str) -> Self {
        Self::asc(column)
    }
}

impl From<String> for OrderSpec {
    fn from(column: String) -> Self {
        Self::asc(column)
    }
}

/// Renders a list of order keys as the body of an ORDER BY clause,
/// preserving input order.
#[must_use]
pub(crate) fn render_order_by(specs: &[OrderSpec]) -> String {
    specs
        .iter()
        .map(OrderSpec::render)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_column() {
        assert_eq!(render_order_by(&[OrderSpec::asc("a")]), "\"a\"");
    }

    #[test]
    fn test_modifiers() {
        assert_eq!(
            render_order_by(&[OrderSpec::desc("a").nulls_last()]),
            "\"a\" DESC NULLS LAST"
        );
        assert_eq!(
            render_order_by(&[OrderSpec::asc("a").nulls_last()]),
            "\"a\" NULLS LAST"
        );
    }

    #[test]
    fn test_list_preserves_order() {
        assert_eq!(
            render_order_by(&[OrderSpec::desc("a").nulls_last(), OrderSpec::asc("b")]),
            "\"a\" DESC NULLS LAST, \"b\""
        );
    }
}
