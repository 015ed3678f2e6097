//! DeleteColumn command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::ColumnId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Delete a column. Refused while the column still holds tasks.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

impl DeleteColumn {
    /// Create a new DeleteColumn command
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for DeleteColumn {
    fn verb(&self) -> &'static str {
        "delete"
    }
    fn noun(&self) -> &'static str {
        "column"
    }
    fn description(&self) -> &'static str {
        "Delete an empty column"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for DeleteColumn {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let column = ctx.read_column(&self.id).await?;

            let tasks = ctx.read_all_tasks().await?;
            let count = tasks
                .iter()
                .filter(|t| t.position.column == self.id)
                .count();
            if count > 0 {
                return Err(WorklaneError::ColumnNotEmpty {
                    id: self.id.to_string(),
                    count,
                });
            }

            ctx.delete_column_file(&self.id).await?;
            Ok(serde_json::json!({ "id": column.id, "deleted": true }))
        }
        .await;

        finish_logged(self, input, result, start)
    }
}
