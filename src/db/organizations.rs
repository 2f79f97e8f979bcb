// SPDX-License-Identifier: Apache-2.0

//! Organization lookups for prompt context
//!
//! Fetches the programs and locations belonging to an organization and
//! formats them as the text block the agent description embeds.

use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use dojo_core::{AgentResult, Value};

use super::SqlExecutor;

const PROGRAMS_QUERY: &str = "SELECT id, name FROM programs WHERE location_id IN \
                              (SELECT id FROM locations WHERE organization_id = $1)";
const LOCATIONS_QUERY: &str = "SELECT id, short_name FROM locations WHERE organization_id = $1";

pub struct OrganizationService {
    executor: Arc<SqlExecutor>,
}

impl OrganizationService {
    pub fn new(executor: Arc<SqlExecutor>) -> Self {
        Self { executor }
    }

    /// Program and location listing for an organization, formatted for
    /// inclusion in the agent description.
    #[instrument(skip(self), fields(organization_id = %organization_id))]
    pub async fn organization_summary(&self, organization_id: Uuid) -> AgentResult<String> {
        let org_id = Value::Uuid(organization_id);
        let programs = self
            .executor
            .run_select(PROGRAMS_QUERY, std::slice::from_ref(&org_id))
            .await?;
        let locations = self
            .executor
            .run_select(LOCATIONS_QUERY, std::slice::from_ref(&org_id))
            .await?;

        Ok(format_summary(&programs.rows, &locations.rows))
    }
}

fn format_summary(programs: &[serde_json::Value], locations: &[serde_json::Value]) -> String {
    let programs_info: Vec<String> = programs
        .iter()
        .map(|row| format!("- {} (ID: {})", field(row, "name"), field(row, "id")))
        .collect();
    let locations_info: Vec<String> = locations
        .iter()
        .map(|row| format!("- {} (ID: {})", field(row, "short_name"), field(row, "id")))
        .collect();

    format!(
        "Programs:\n{}\n\nLocations:\n{}",
        programs_info.join("\n"),
        locations_info.join("\n")
    )
}

fn field(row: &serde_json::Value, name: &str) -> String {
    match &row[name] {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_formats_programs_and_locations() {
        let programs = vec![
            json!({"id": "p-1", "name": "Little Dragons"}),
            json!({"id": "p-2", "name": "Adult Krav Maga"}),
        ];
        let locations = vec![json!({"id": "l-1", "short_name": "Downtown"})];

        let summary = format_summary(&programs, &locations);
        assert_eq!(
            summary,
            "Programs:\n- Little Dragons (ID: p-1)\n- Adult Krav Maga (ID: p-2)\n\nLocations:\n- Downtown (ID: l-1)"
        );
    }

    #[test]
    fn summary_tolerates_missing_fields() {
        let programs = vec![json!({"id": "p-1"})];
        let summary = format_summary(&programs, &[]);
        assert!(summary.contains("-  (ID: p-1)"));
    }
}
