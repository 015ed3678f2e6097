//! Operation and Execute traits
//!
//! An operation is identified by a verb + noun pair ("add task", "move task").
//! Execution is separated from identity so read-only tools can introspect
//! operations without running them.

use crate::ExecutionResult;
use async_trait::async_trait;
use serde_json::Value;

/// Identity metadata for an operation
///
/// Implemented by hand on each command struct: three short methods.
pub trait Operation {
    /// The verb (e.g., "add", "update", "move")
    fn verb(&self) -> &'static str;

    /// The noun (e.g., "task", "column", "board")
    fn noun(&self) -> &'static str;

    /// Human-readable description of what the operation does
    fn description(&self) -> &'static str;

    /// Canonical op string used in logs (e.g., "add task")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context
#[async_trait]
pub trait Execute<C, E>: Operation {
    /// Run the operation, producing a JSON value and optional log entry
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;

    /// IDs of the resources this execution touched, extracted from the result.
    ///
    /// Used by processors to route log entries to per-entity logs.
    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result
            .get("id")
            .and_then(|v| v.as_str())
            .map(|id| vec![id.to_string()])
            .unwrap_or_default()
    }
}
