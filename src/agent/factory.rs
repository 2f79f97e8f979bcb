// SPDX-License-Identifier: Apache-2.0

//! Agent factory
//!
//! Assembles everything an external agent framework needs to run the CRM
//! agent for one organization: model config, description, instructions,
//! and the tool registry. Construction is pure wiring; the factory never
//! talks to the model.

use std::sync::Arc;

use tracing::{error, info, instrument};
use uuid::{uuid, Uuid};

use dojo_core::AgentResult;

use super::context;
use super::tools::{DescribeSchemaTool, SendSmsTool, SqlQueryTool};
use super::types::ModelConfig;
use super::ToolRegistry;
use crate::db::{MessageLogger, OrganizationService, SchemaIntrospector, SqlExecutor};
use crate::sms::TwilioClient;

/// User recorded against exchanges when the caller does not supply one.
pub const DEFAULT_USER_ID: Uuid = uuid!("0d2425a9-0663-4795-b9cb-52b1343a82de");

/// A fully assembled agent, ready to hand to a framework.
pub struct AgentDefinition {
    pub model: ModelConfig,
    pub description: String,
    pub instructions: Vec<String>,
    pub tools: ToolRegistry,
    pub user_id: Uuid,
    pub run_id: Option<String>,
}

pub struct AgentFactory {
    executor: Arc<SqlExecutor>,
    organizations: Arc<OrganizationService>,
    introspector: Arc<SchemaIntrospector>,
    messages: Arc<MessageLogger>,
    sms: Option<Arc<TwilioClient>>,
    model: ModelConfig,
}

impl AgentFactory {
    pub fn new(
        executor: Arc<SqlExecutor>,
        organizations: Arc<OrganizationService>,
        introspector: Arc<SchemaIntrospector>,
        messages: Arc<MessageLogger>,
        sms: Option<Arc<TwilioClient>>,
        model: ModelConfig,
    ) -> Self {
        Self {
            executor,
            organizations,
            introspector,
            messages,
            sms,
            model,
        }
    }

    /// The tool set for this deployment. SMS is present only when Twilio
    /// credentials were configured.
    pub fn build_tools(&self) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(SqlQueryTool::new(Arc::clone(&self.executor))));
        registry.register(Arc::new(DescribeSchemaTool::new(Arc::clone(
            &self.introspector,
        ))));
        if let Some(sms) = &self.sms {
            registry.register(Arc::new(SendSmsTool::new(Arc::clone(sms))));
        }
        registry
    }

    /// Build the agent definition for an organization.
    #[instrument(skip(self), fields(organization_id = %organization_id))]
    pub async fn build_definition(
        &self,
        organization_id: Uuid,
        run_id: Option<String>,
        user_id: Option<Uuid>,
    ) -> AgentResult<AgentDefinition> {
        let description =
            context::build_description(&self.introspector, &self.organizations, organization_id)
                .await?;

        info!("Built agent definition");

        Ok(AgentDefinition {
            model: self.model.clone(),
            description,
            instructions: context::instructions(),
            tools: self.build_tools(),
            user_id: user_id.unwrap_or(DEFAULT_USER_ID),
            run_id,
        })
    }

    /// Persist a completed exchange. Failures are logged, never
    /// propagated; the agent loop keeps running either way.
    pub async fn record_exchange(&self, user_id: Uuid, user_message: &str, ai_response: &str) {
        if let Err(e) = self
            .messages
            .log_message(&user_id.to_string(), user_message, ai_response, None)
            .await
        {
            error!(error = %e, "Failed to record agent exchange");
        }
    }
}
