//! Partial-update builder
//!
//! Maps a set of optional named columns to `column = $n` fragments with
//! their bound values. Placeholders are numbered by `QueryBuilder`, so
//! skipped fields never leave gaps in the parameter list.

use sqlx::{types::Json, Postgres, QueryBuilder};

/// A value bound into an UPDATE assignment
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Float(f64),
    TextList(Vec<String>),
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        Self::TextList(v)
    }
}

/// Column assignments for a single-row UPDATE
#[derive(Debug, Clone)]
pub struct UpdateSet {
    table: &'static str,
    assignments: Vec<(&'static str, FieldValue)>,
}

impl UpdateSet {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    /// Add an assignment when a value was supplied.
    pub fn set<V: Into<FieldValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.assignments.push((column, value.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|(c, _)| *c).collect()
    }

    /// Build `UPDATE <table> SET ... WHERE <key_column> = $n`.
    ///
    /// Returns `None` when no assignments were made.
    pub fn into_query(
        self,
        key_column: &'static str,
        key: i32,
    ) -> Option<QueryBuilder<'static, Postgres>> {
        if self.assignments.is_empty() {
            return None;
        }

        let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", self.table));
        {
            let mut assignments = builder.separated(", ");
            for (column, value) in self.assignments {
                assignments.push(column);
                assignments.push_unseparated(" = ");
                match value {
                    FieldValue::Text(v) => assignments.push_bind_unseparated(v),
                    FieldValue::Float(v) => assignments.push_bind_unseparated(v),
                    FieldValue::TextList(v) => assignments.push_bind_unseparated(Json(v)),
                };
            }
        }
        builder.push(" WHERE ");
        builder.push(key_column);
        builder.push(" = ");
        builder.push_bind(key);

        Some(builder)
    }
}
