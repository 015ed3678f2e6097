//! GetBoard command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Get the board with its columns
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GetBoard {}

impl GetBoard {
    /// Create a new GetBoard command
    pub fn new() -> Self {
        Self {}
    }
}

impl Operation for GetBoard {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "board"
    }
    fn description(&self) -> &'static str {
        "Get board metadata and columns"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for GetBoard {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let result: Result<Value> = async {
            let board = ctx.read_board().await?;
            let columns = ctx.read_all_columns().await?;

            let mut value = serde_json::to_value(&board)?;
            value["columns"] = serde_json::to_value(&columns)?;
            Ok(value)
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
