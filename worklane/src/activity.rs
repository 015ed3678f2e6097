//! ListActivity command - the global operation log

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// List activity log entries, newest first
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListActivity {
    /// Maximum number of entries to return
    pub limit: Option<usize>,
}

impl ListActivity {
    /// Create a new ListActivity command
    pub fn new() -> Self {
        Self { limit: None }
    }

    /// Limit the number of entries
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Operation for ListActivity {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "activity"
    }
    fn description(&self) -> &'static str {
        "List activity log entries, newest first"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for ListActivity {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let result: Result<Value> = async {
            let entries = ctx.read_activity(self.limit).await?;
            Ok(serde_json::to_value(&entries)?)
        }
        .await;

        match result {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error,
                log_entry: None,
            },
        }
    }
}
