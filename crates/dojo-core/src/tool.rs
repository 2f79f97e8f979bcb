// SPDX-License-Identifier: Apache-2.0

//! Tool-callable boundary for external agent frameworks.
//!
//! The LLM side of the system (model invocation, tool-call protocol,
//! conversation memory) lives in whatever agent framework the caller
//! uses. This trait is the seam: the framework sees named tools taking
//! and returning JSON, and never touches the database or SMS layer
//! directly.

use async_trait::async_trait;

use crate::error::AgentResult;

/// A tool an agent framework can invoke by name with JSON arguments.
#[async_trait]
pub trait ToolCallable: Send + Sync {
    /// Stable tool name, as exposed to the framework.
    fn name(&self) -> &'static str;

    /// Human/model-readable description of what the tool does.
    fn description(&self) -> &'static str;

    /// Invoke the tool. Arguments and result are JSON values.
    async fn call(&self, args: serde_json::Value) -> AgentResult<serde_json::Value>;
}
