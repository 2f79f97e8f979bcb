// SPDX-License-Identifier: Apache-2.0

//! Query Gate
//!
//! Mediates between natural-language-driven callers and direct SQL
//! execution: every statement is classified by a lexical test and checked
//! against a fixed permission table before the database driver ever sees
//! it. The gate executes nothing itself and never fails on malformed SQL;
//! it only classifies and permits or denies.
//!
//! Classification is a substring heuristic, not a parse. Two consequences
//! callers must be aware of:
//!
//! - A statement containing a denylisted keyword inside a string literal
//!   or identifier (`SELECT * FROM audit_log WHERE action = 'update'`) is
//!   classified by that keyword, not by its leading clause.
//! - Multi-statement input (`;`-separated) is classified as a whole by the
//!   first matching pattern; a dangerous statement appended after a
//!   permitted one is not independently detected.

use serde::{Deserialize, Serialize};

use dojo_core::{GateError, StatementKind};

/// Permission table mapping each statement kind to an allow flag.
///
/// Immutable after construction; the gate owns the instance it was
/// configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySet {
    pub select: bool,
    pub insert: bool,
    pub update: bool,
    pub delete: bool,
    pub drop: bool,
}

impl PolicySet {
    /// Default policy: reads and row-level writes permitted, DELETE and
    /// DROP denied.
    pub const fn new() -> Self {
        Self {
            select: true,
            insert: true,
            update: true,
            delete: false,
            drop: false,
        }
    }

    /// Policy permitting only SELECT.
    pub const fn read_only() -> Self {
        Self {
            select: true,
            insert: false,
            update: false,
            delete: false,
            drop: false,
        }
    }

    /// Policy permitting everything, including DROP.
    pub const fn permissive() -> Self {
        Self {
            select: true,
            insert: true,
            update: true,
            delete: true,
            drop: true,
        }
    }

    /// Returns a copy with the flag for `kind` overridden.
    pub const fn with(mut self, kind: StatementKind, allowed: bool) -> Self {
        match kind {
            StatementKind::Select => self.select = allowed,
            StatementKind::Insert => self.insert = allowed,
            StatementKind::Update => self.update = allowed,
            StatementKind::Delete => self.delete = allowed,
            StatementKind::Drop => self.drop = allowed,
        }
        self
    }

    pub const fn allows(&self, kind: StatementKind) -> bool {
        match kind {
            StatementKind::Select => self.select,
            StatementKind::Insert => self.insert,
            StatementKind::Update => self.update,
            StatementKind::Delete => self.delete,
            StatementKind::Drop => self.drop,
        }
    }
}

impl Default for PolicySet {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a [`QueryGate`].
///
/// The gate reads nothing from the environment; everything it needs
/// arrives through this struct.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GateConfig {
    pub policy: PolicySet,
}

/// Outcome of evaluating a statement against a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum Decision {
    Allow,
    Deny { kind: StatementKind },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Map a denial to its error, for call sites that propagate with `?`.
    pub fn into_result(self) -> Result<(), GateError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny { kind } => Err(GateError::PolicyViolation { kind }),
        }
    }
}

/// Classify a statement by lexical inspection of a trimmed, lower-cased
/// copy. The original text is untouched; it is what executes downstream.
///
/// Denylist patterns are tested in priority order (DROP before DELETE
/// before UPDATE before INSERT) and the first match wins. Anything that
/// matches none of them counts as SELECT/other-read.
pub fn classify(statement: &str) -> StatementKind {
    let normalized = statement.trim().to_lowercase();

    if normalized.contains("drop table") || normalized.contains("drop database") {
        StatementKind::Drop
    } else if normalized.contains("delete from") {
        StatementKind::Delete
    } else if normalized.contains("update") {
        StatementKind::Update
    } else if normalized.contains("insert into") {
        StatementKind::Insert
    } else {
        StatementKind::Select
    }
}

/// The gate itself: a policy and nothing else.
///
/// Pure and stateless; safe to share across tasks without synchronization.
#[derive(Debug, Clone)]
pub struct QueryGate {
    policy: PolicySet,
}

impl QueryGate {
    pub fn new(config: GateConfig) -> Self {
        Self { policy: config.policy }
    }

    pub fn policy(&self) -> &PolicySet {
        &self.policy
    }

    /// Classify `statement` and check the policy flag for its kind.
    ///
    /// Never errors on malformed SQL; syntax problems are the downstream
    /// driver's to report.
    pub fn evaluate(&self, statement: &str) -> Decision {
        let kind = classify(statement);
        if self.policy.allows(kind) {
            Decision::Allow
        } else {
            Decision::Deny { kind }
        }
    }

    /// Like [`evaluate`](Self::evaluate), but additionally rejects any
    /// statement whose normalized form does not begin with `SELECT`,
    /// regardless of policy. For call sites that must guarantee read-only
    /// execution.
    pub fn require_select(&self, statement: &str) -> Result<(), GateError> {
        if !statement.trim().to_lowercase().starts_with("select") {
            return Err(GateError::NotASelectStatement);
        }
        self.evaluate(statement).into_result()
    }
}
