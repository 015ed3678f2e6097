//! ListTasks command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::types::ColumnId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// List tasks, optionally filtered by column, sorted board-order
/// (column order, then ordinal within the column)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListTasks {
    /// Only tasks in this column
    pub column: Option<ColumnId>,
}

impl ListTasks {
    /// Create a new ListTasks command
    pub fn new() -> Self {
        Self { column: None }
    }

    /// Filter to one column
    pub fn with_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }
}

impl Operation for ListTasks {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "List tasks in board order"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for ListTasks {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let result: Result<Value> = async {
            let columns = ctx.read_all_columns().await?;
            let column_order = |id: &ColumnId| {
                columns
                    .iter()
                    .position(|c| &c.id == id)
                    .unwrap_or(usize::MAX)
            };

            let mut tasks = ctx.read_all_tasks().await?;
            if let Some(column) = &self.column {
                tasks.retain(|t| &t.position.column == column);
            }
            tasks.sort_by(|a, b| {
                column_order(&a.position.column)
                    .cmp(&column_order(&b.position.column))
                    .then_with(|| a.position.ordinal.cmp(&b.position.ordinal))
            });

            Ok(serde_json::to_value(&tasks)?)
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
