// SPDX-License-Identifier: Apache-2.0

//! Parameterized statement builders
//!
//! Thin helpers producing `INSERT` / `UPDATE` text plus the values to bind.
//! Values are always bound through placeholders, never interpolated into
//! the SQL text. Identifiers are a different story: table and column names
//! ARE interpolated directly, so callers must restrict them to a known
//! schema allow-list. That is a documented trust boundary, not a safety
//! guarantee of the builder. Likewise `build_update`'s `where_clause`
//! passes through as literal SQL and must never come from untrusted input.

use std::collections::BTreeMap;

use serde::Serialize;

use dojo_core::Value;

/// A statement plus its bound parameters.
///
/// Placeholders use the Postgres `$n` convention; `params` pairs each
/// placeholder, in order, with the column it binds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundStatement {
    pub sql: String,
    pub params: Vec<(String, Value)>,
}

impl BoundStatement {
    /// Values only, in placeholder order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.params.iter().map(|(_, v)| v)
    }
}

/// Build `INSERT INTO {table} ({cols}) VALUES ($1..$n) RETURNING id`.
///
/// Columns come out in sorted order (the `BTreeMap` iteration order), so
/// the same `data` always produces the same text. An empty `data` map
/// yields a statement no database will accept; callers validate their
/// column maps first.
pub fn build_insert(table: &str, data: &BTreeMap<String, Value>) -> BoundStatement {
    let mut columns: Vec<&str> = Vec::with_capacity(data.len());
    let mut placeholders: Vec<String> = Vec::with_capacity(data.len());
    let mut params: Vec<(String, Value)> = Vec::with_capacity(data.len());

    for (idx, (col, val)) in data.iter().enumerate() {
        columns.push(col.as_str());
        placeholders.push(format!("${}", idx + 1));
        params.push((col.clone(), val.clone()));
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
        table,
        columns.join(", "),
        placeholders.join(", ")
    );

    BoundStatement { sql, params }
}

/// Build `UPDATE {table} SET col = $n, ... WHERE {where_clause}`.
///
/// `where_clause` is appended verbatim: an explicit injection risk the
/// caller mitigates by only ever passing clauses it constructed itself.
pub fn build_update(
    table: &str,
    data: &BTreeMap<String, Value>,
    where_clause: &str,
) -> BoundStatement {
    let mut assignments: Vec<String> = Vec::with_capacity(data.len());
    let mut params: Vec<(String, Value)> = Vec::with_capacity(data.len());

    for (idx, (col, val)) in data.iter().enumerate() {
        assignments.push(format!("{} = ${}", col, idx + 1));
        params.push((col.clone(), val.clone()));
    }

    let sql = format!(
        "UPDATE {} SET {} WHERE {}",
        table,
        assignments.join(", "),
        where_clause
    );

    BoundStatement { sql, params }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn insert_single_column() {
        let bound = build_insert("programs", &data(&[("name", Value::from("Krav Maga"))]));
        assert_eq!(
            bound.sql,
            "INSERT INTO programs (name) VALUES ($1) RETURNING id"
        );
        assert_eq!(
            bound.params,
            vec![("name".to_string(), Value::from("Krav Maga"))]
        );
    }

    #[test]
    fn insert_orders_columns_deterministically() {
        let bound = build_insert(
            "contacts",
            &data(&[
                ("phone", Value::from("+15551234567")),
                ("first_name", Value::from("Ada")),
                ("last_name", Value::from("Lovelace")),
            ]),
        );
        assert_eq!(
            bound.sql,
            "INSERT INTO contacts (first_name, last_name, phone) VALUES ($1, $2, $3) RETURNING id"
        );
        let cols: Vec<&str> = bound.params.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(cols, vec!["first_name", "last_name", "phone"]);
    }

    #[test]
    fn insert_never_interpolates_values() {
        let hostile = Value::from("'); DROP TABLE programs; --");
        let bound = build_insert("programs", &data(&[("name", hostile.clone())]));
        assert!(!bound.sql.contains("DROP TABLE"));
        assert_eq!(bound.params[0].1, hostile);
    }

    #[test]
    fn update_binds_values_and_passes_where_through() {
        let bound = build_update(
            "class_schedules",
            &data(&[
                ("class_name", Value::from("Advanced Judo")),
                ("day_of_week", Value::Int(3)),
            ]),
            "id = 'abc'",
        );
        assert_eq!(
            bound.sql,
            "UPDATE class_schedules SET class_name = $1, day_of_week = $2 WHERE id = 'abc'"
        );
        assert_eq!(bound.params.len(), 2);
    }

    #[test]
    fn builders_are_deterministic() {
        let d = data(&[("a", Value::Int(1)), ("b", Value::Int(2))]);
        assert_eq!(build_insert("t", &d), build_insert("t", &d));
        assert_eq!(
            build_update("t", &d, "id = 1"),
            build_update("t", &d, "id = 1")
        );
    }
}
