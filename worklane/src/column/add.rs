//! AddColumn command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::{Column, ColumnId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Add a new column (workflow stage)
#[derive(Debug, Deserialize, Serialize)]
pub struct AddColumn {
    /// Column ID (slug, e.g. "review")
    pub id: ColumnId,
    /// Display name
    pub name: String,
    /// Display order (default: after all existing columns)
    pub order: Option<usize>,
}

impl AddColumn {
    /// Create a new AddColumn command
    pub fn new(id: impl Into<ColumnId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order: None,
        }
    }

    /// Set the display order
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }
}

impl Operation for AddColumn {
    fn verb(&self) -> &'static str {
        "add"
    }
    fn noun(&self) -> &'static str {
        "column"
    }
    fn description(&self) -> &'static str {
        "Add a new column"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for AddColumn {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            if ctx.column_exists(&self.id) {
                return Err(WorklaneError::duplicate_id("column", self.id.as_str()));
            }

            let order = match self.order {
                Some(order) => order,
                None => {
                    let columns = ctx.read_all_columns().await?;
                    columns.iter().map(|c| c.order + 1).max().unwrap_or(0)
                }
            };

            let column = Column::new(self.id.clone(), &self.name, order);
            ctx.write_column(&column).await?;
            Ok(serde_json::to_value(&column)?)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, WorklaneContext) {
        let temp = TempDir::new().unwrap();
        let ctx = WorklaneContext::new(temp.path().join(".worklane"));
        InitBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        (temp, ctx)
    }

    #[tokio::test]
    async fn test_add_column_defaults_to_end() {
        let (_temp, ctx) = setup().await;

        let result = AddColumn::new("review", "Review")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["id"], "review");
        // Default board has orders 0..=2
        assert_eq!(result["order"], 3);
    }

    #[tokio::test]
    async fn test_add_column_duplicate() {
        let (_temp, ctx) = setup().await;

        let result = AddColumn::new("todo", "Also Todo").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(WorklaneError::DuplicateId { .. })));
    }
}
