//! MoveTask command - the kanban drag/reorder operation

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::{ColumnId, Ordinal, Position, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Move a task to a new position
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// Target column
    pub column: ColumnId,
    /// Explicit ordinal within the column; default = after all existing tasks
    pub ordinal: Option<Ordinal>,
}

impl MoveTask {
    /// Create a new MoveTask command with an explicit ordinal
    pub fn new(id: impl Into<TaskId>, column: impl Into<ColumnId>, ordinal: Ordinal) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            ordinal: Some(ordinal),
        }
    }

    /// Move to a column, landing after all existing tasks in it
    pub fn to_column(id: impl Into<TaskId>, column: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            ordinal: None,
        }
    }
}

impl Operation for MoveTask {
    fn verb(&self) -> &'static str {
        "move"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Move a task to a different column or position"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for MoveTask {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut task = ctx.read_task(&self.id).await?;

            if !ctx.column_exists(&self.column) {
                return Err(WorklaneError::ColumnNotFound {
                    id: self.column.to_string(),
                });
            }

            let ordinal = match &self.ordinal {
                Some(ordinal) => ordinal.clone(),
                None => ordinal_at_end(ctx, &self.column, Some(&self.id)).await?,
            };

            task.position = Position::new(self.column.clone(), ordinal);
            ctx.write_task(&task).await?;
            Ok(serde_json::to_value(&task)?)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}

/// Ordinal after every task currently in `column`, skipping `exclude`
/// (the task being moved).
pub(crate) async fn ordinal_at_end(
    ctx: &WorklaneContext,
    column: &ColumnId,
    exclude: Option<&TaskId>,
) -> Result<Ordinal> {
    let mut last: Option<Ordinal> = None;

    for task in ctx.read_all_tasks().await? {
        if Some(&task.id) == exclude {
            continue;
        }
        if &task.position.column == column {
            last = Some(match last {
                None => task.position.ordinal,
                Some(o) if task.position.ordinal > o => task.position.ordinal,
                Some(o) => o,
            });
        }
    }

    Ok(match last {
        Some(last) => Ordinal::after(&last),
        None => Ordinal::first(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::task::AddTask;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, WorklaneContext) {
        let temp = TempDir::new().unwrap();
        let ctx = WorklaneContext::new(temp.path().join(".worklane"));
        InitBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        (temp, ctx)
    }

    #[tokio::test]
    async fn test_move_task_to_column() {
        let (_temp, ctx) = setup().await;

        let add_result = AddTask::new("Task").execute(&ctx).await.into_result().unwrap();
        let task_id = add_result["id"].as_str().unwrap();

        let result = MoveTask::to_column(task_id, "done")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["position"]["column"], "done");
    }

    #[tokio::test]
    async fn test_move_task_lands_after_existing() {
        let (_temp, ctx) = setup().await;

        let first = AddTask::new("First").execute(&ctx).await.into_result().unwrap();
        let second = AddTask::new("Second").execute(&ctx).await.into_result().unwrap();

        // Move first to the end of its own column
        let moved = MoveTask::to_column(first["id"].as_str().unwrap(), "todo")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let moved_ord = moved["position"]["ordinal"].as_str().unwrap();
        let second_ord = second["position"]["ordinal"].as_str().unwrap();
        assert!(moved_ord > second_ord);
    }

    #[tokio::test]
    async fn test_move_task_with_explicit_ordinal() {
        let (_temp, ctx) = setup().await;

        let first = AddTask::new("First").execute(&ctx).await.into_result().unwrap();
        let second = AddTask::new("Second").execute(&ctx).await.into_result().unwrap();

        let ord1: Ordinal =
            serde_json::from_value(first["position"]["ordinal"].clone()).unwrap();
        let ord2: Ordinal =
            serde_json::from_value(second["position"]["ordinal"].clone()).unwrap();

        // Drop a third task between the two
        let third = AddTask::new("Third").execute(&ctx).await.into_result().unwrap();
        let between = Ordinal::between(&ord1, &ord2);
        let result = MoveTask::new(third["id"].as_str().unwrap(), "todo", between.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(
            result["position"]["ordinal"].as_str().unwrap(),
            between.as_str()
        );
    }

    #[tokio::test]
    async fn test_move_task_invalid_column() {
        let (_temp, ctx) = setup().await;

        let add_result = AddTask::new("Task").execute(&ctx).await.into_result().unwrap();
        let task_id = add_result["id"].as_str().unwrap();

        let result = MoveTask::to_column(task_id, "nonexistent").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(WorklaneError::ColumnNotFound { .. })));
    }
}
