// SPDX-License-Identifier: Apache-2.0

//! Shared types for the agent gateway
//!
//! These types provide a normalized representation of SQL statements,
//! bound parameter values, and query results, independent of the
//! database driver executing them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse category a SQL statement is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Drop,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Drop => "DROP",
        }
    }

    /// Returns true if this statement kind modifies data
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Select)
    }

    /// Returns true if this statement kind is potentially destructive
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete | Self::Drop)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter value bound into a statement placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

/// Normalized result of a query execution.
///
/// Rows are JSON objects keyed by column name, in column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<serde_json::Value>,
    pub affected_rows: Option<u64>,
    pub execution_time_ms: f64,
}

impl QueryOutput {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_kind_predicates() {
        assert!(!StatementKind::Select.is_mutation());
        assert!(StatementKind::Insert.is_mutation());
        assert!(StatementKind::Drop.is_destructive());
        assert!(StatementKind::Delete.is_destructive());
        assert!(!StatementKind::Update.is_destructive());
    }

    #[test]
    fn statement_kind_serializes_lowercase() {
        let json = serde_json::to_string(&StatementKind::Drop).unwrap();
        assert_eq!(json, "\"drop\"");
    }

    #[test]
    fn value_from_conversions() {
        assert_eq!(Value::from("abc"), Value::Text("abc".to_string()));
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert!(Value::Null.is_null());
    }
}
