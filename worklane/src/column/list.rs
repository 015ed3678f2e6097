//! ListColumns command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// List columns in display order
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListColumns {}

impl ListColumns {
    /// Create a new ListColumns command
    pub fn new() -> Self {
        Self {}
    }
}

impl Operation for ListColumns {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "column"
    }
    fn description(&self) -> &'static str {
        "List columns in display order"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for ListColumns {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let result: Result<Value> = async {
            let columns = ctx.read_all_columns().await?;
            Ok(serde_json::to_value(&columns)?)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::column::AddColumn;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_columns_in_order() {
        let temp = TempDir::new().unwrap();
        let ctx = WorklaneContext::new(temp.path().join(".worklane"));
        InitBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        AddColumn::new("review", "Review")
            .with_order(1)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = ListColumns::new().execute(&ctx).await.into_result().unwrap();
        let ids: Vec<&str> = result
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();

        // Same order value sorts stably; review shares order 1 with doing
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[0], "todo");
        assert_eq!(*ids.last().unwrap(), "done");
    }
}
