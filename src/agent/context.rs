// SPDX-License-Identifier: Apache-2.0

//! Prompt context assembly
//!
//! Builds the description and instruction set an agent framework feeds to
//! the model: the live schema overview plus the organization's programs
//! and locations.

use uuid::Uuid;

use dojo_core::AgentResult;

use crate::db::{OrganizationService, SchemaIntrospector};

/// Standing instructions for the CRM agent.
pub fn instructions() -> Vec<String> {
    vec![
        "You are an AI agent that can create or modify records in the martial_arts_crm \
         database by generating PostgreSQL queries."
            .to_string(),
        "Always respond concisely and directly to the user, summarizing what you did or \
         found. The user is not interested in the tool calls you made or the database \
         queries you ran."
            .to_string(),
        "Use the schema info to ensure your queries are correct. If something is unclear, \
         ask clarifying questions."
            .to_string(),
        "When searching text fields, use ILIKE for case-insensitive pattern matching. \
         Example: WHERE short_name ILIKE '%search_term%'"
            .to_string(),
    ]
}

/// Agent description: schema overview followed by the organization's
/// programs and locations.
pub async fn build_description(
    introspector: &SchemaIntrospector,
    organizations: &OrganizationService,
    organization_id: Uuid,
) -> AgentResult<String> {
    let schema = introspector.schema_overview(None).await?;
    let organization = organizations.organization_summary(organization_id).await?;
    Ok(format!("{}\n\n{}", schema.trim_end(), organization))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_cover_the_core_rules() {
        let lines = instructions();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("martial_arts_crm"));
        assert!(lines.iter().any(|l| l.contains("ILIKE")));
    }
}
