// SPDX-License-Identifier: Apache-2.0

//! Normalized error types for the agent gateway
//!
//! Gate denials are their own small enum so callers can match on them
//! without dragging in the application-level error surface. Everything
//! else maps to `AgentError` for consistent handling across the service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::StatementKind;

/// Validation failures produced by the query gate, before any I/O.
///
/// Both variants are recoverable: the expected handling is to report the
/// denial back to the invoking agent as a structured rejection and keep
/// the surrounding loop running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GateError {
    #[error("policy violation: {kind} statements are denied by the active policy")]
    PolicyViolation { kind: StatementKind },

    #[error("read-only execution requires a SELECT statement")]
    NotASelectStatement,
}

/// Unified error type for all gateway operations
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Query blocked: {0}")]
    Blocked(#[from] GateError),

    #[error("Query execution error: {message}")]
    ExecutionError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("SMS delivery error: {message}")]
    SmsError { message: String },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AgentError {
    pub fn connection_failed(msg: impl Into<String>) -> Self {
        Self::ConnectionFailed { message: msg.into() }
    }

    pub fn execution_error(msg: impl Into<String>) -> Self {
        Self::ExecutionError { message: msg.into() }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError { message: msg.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError { message: msg.into() }
    }

    pub fn sms(msg: impl Into<String>) -> Self {
        Self::SmsError { message: msg.into() }
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal { message: msg.into() }
    }

    /// Returns the gate denial behind this error, if that is what it is.
    pub fn as_gate_error(&self) -> Option<&GateError> {
        match self {
            Self::Blocked(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for gateway operations
pub type AgentResult<T> = Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_violation_names_the_kind() {
        let err = GateError::PolicyViolation { kind: StatementKind::Drop };
        assert!(err.to_string().contains("DROP"));
    }

    #[test]
    fn gate_error_converts_to_blocked() {
        let err: AgentError = GateError::NotASelectStatement.into();
        assert!(err.as_gate_error().is_some());
        assert!(err.to_string().starts_with("Query blocked"));
    }
}
