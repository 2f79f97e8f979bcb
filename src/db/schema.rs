// SPDX-License-Identifier: Apache-2.0

//! Schema introspection
//!
//! Reads `information_schema.columns` through the read-only execution
//! path and renders a compact overview the agent prompt embeds. The
//! queries are plain catalog reads; correctness of what the catalog
//! reports is Postgres's business, not ours.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use dojo_core::AgentResult;

use super::SqlExecutor;

const COLUMNS_QUERY: &str = "SELECT table_name, column_name, data_type, is_nullable, column_default \
     FROM information_schema.columns WHERE table_schema = 'public' \
     ORDER BY table_name, ordinal_position";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

pub struct SchemaIntrospector {
    executor: Arc<SqlExecutor>,
}

impl SchemaIntrospector {
    pub fn new(executor: Arc<SqlExecutor>) -> Self {
        Self { executor }
    }

    /// Describe the public-schema tables, optionally restricted to a
    /// name list.
    #[instrument(skip(self, tables))]
    pub async fn describe_tables(&self, tables: Option<&[String]>) -> AgentResult<Vec<TableInfo>> {
        let output = self.executor.run_select(COLUMNS_QUERY, &[]).await?;

        let mut result: Vec<TableInfo> = Vec::new();
        for row in &output.rows {
            let table = row["table_name"].as_str().unwrap_or_default().to_string();
            if let Some(filter) = tables {
                if !filter.iter().any(|t| t == &table) {
                    continue;
                }
            }

            let column = ColumnInfo {
                name: row["column_name"].as_str().unwrap_or_default().to_string(),
                data_type: row["data_type"].as_str().unwrap_or_default().to_string(),
                nullable: row["is_nullable"].as_str() == Some("YES"),
                default_value: row["column_default"].as_str().map(String::from),
            };

            match result.last_mut() {
                Some(entry) if entry.name == table => entry.columns.push(column),
                _ => result.push(TableInfo {
                    name: table,
                    columns: vec![column],
                }),
            }
        }

        Ok(result)
    }

    /// The schema overview block embedded in agent descriptions.
    pub async fn schema_overview(&self, tables: Option<&[String]>) -> AgentResult<String> {
        Ok(format_overview(&self.describe_tables(tables).await?))
    }
}

/// Format table descriptions into the compact text the prompt uses.
pub fn format_overview(tables: &[TableInfo]) -> String {
    let mut out = String::from("You have access to a Postgres database with the following tables:\n");

    for table in tables {
        writeln!(out, "- {}", table.name).unwrap();
        for col in &table.columns {
            let null_marker = if col.nullable { " NULL" } else { " NOT NULL" };
            let default_marker = col
                .default_value
                .as_ref()
                .map(|d| format!(" DEFAULT {}", d))
                .unwrap_or_default();
            writeln!(
                out,
                "    {}: {}{}{}",
                col.name, col.data_type, null_marker, default_marker
            )
            .unwrap();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_lists_tables_and_columns() {
        let tables = vec![TableInfo {
            name: "programs".to_string(),
            columns: vec![
                ColumnInfo {
                    name: "id".to_string(),
                    data_type: "uuid".to_string(),
                    nullable: false,
                    default_value: Some("gen_random_uuid()".to_string()),
                },
                ColumnInfo {
                    name: "description".to_string(),
                    data_type: "text".to_string(),
                    nullable: true,
                    default_value: None,
                },
            ],
        }];

        let overview = format_overview(&tables);
        assert!(overview.contains("- programs"));
        assert!(overview.contains("id: uuid NOT NULL DEFAULT gen_random_uuid()"));
        assert!(overview.contains("description: text NULL"));
    }

    #[test]
    fn overview_of_empty_schema_is_just_the_header() {
        let overview = format_overview(&[]);
        assert_eq!(
            overview,
            "You have access to a Postgres database with the following tables:\n"
        );
    }
}
