//! GetTask command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::types::TaskId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Get a single task by ID
#[derive(Debug, Deserialize, Serialize)]
pub struct GetTask {
    /// The task ID
    pub id: TaskId,
}

impl GetTask {
    /// Create a new GetTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for GetTask {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Get a task by ID"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for GetTask {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let result: Result<Value> = async {
            let task = ctx.read_task(&self.id).await?;
            Ok(serde_json::to_value(&task)?)
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
