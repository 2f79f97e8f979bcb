// SPDX-License-Identifier: Apache-2.0

//! Agent tool surface
//!
//! The LLM framework itself (model invocation, tool-call protocol,
//! conversation memory) is an external collaborator. This module exposes
//! what such a framework needs: a registry of named tools, the model
//! configuration to hand it, and a factory assembling the full agent
//! definition for an organization.

pub mod context;
pub mod factory;
pub mod tools;
pub mod types;

pub use factory::{AgentDefinition, AgentFactory};
pub use types::ModelConfig;

use std::sync::Arc;

use dojo_core::{AgentError, AgentResult, ToolCallable};

/// Name-indexed set of tools, in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolCallable>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn ToolCallable>) {
        self.tools.push(tool);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolCallable>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Invoke a tool by name. Unknown names are an error; tool-level
    /// failures are whatever the tool itself returns.
    pub async fn dispatch(
        &self,
        name: &str,
        args: serde_json::Value,
    ) -> AgentResult<serde_json::Value> {
        match self.get(name) {
            Some(tool) => tool.call(args).await,
            None => Err(AgentError::unknown_tool(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl ToolCallable for EchoTool {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Returns its arguments."
        }

        async fn call(&self, args: serde_json::Value) -> AgentResult<serde_json::Value> {
            Ok(args)
        }
    }

    #[tokio::test]
    async fn dispatch_routes_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let result = registry.dispatch("echo", json!({"a": 1})).await.unwrap();
        assert_eq!(result, json!({"a": 1}));
        assert_eq!(registry.names(), vec!["echo"]);
    }

    #[tokio::test]
    async fn dispatch_rejects_unknown_tools() {
        let registry = ToolRegistry::new();
        let err = registry.dispatch("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, AgentError::UnknownTool { .. }));
    }
}
