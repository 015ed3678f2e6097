//! DeleteComment command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::{CommentId, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Delete a comment from a task
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteComment {
    /// The task the comment belongs to
    pub task: TaskId,
    /// The comment ID to delete
    pub comment: CommentId,
}

impl DeleteComment {
    /// Create a new DeleteComment command
    pub fn new(task: impl Into<TaskId>, comment: impl Into<CommentId>) -> Self {
        Self {
            task: task.into(),
            comment: comment.into(),
        }
    }
}

impl Operation for DeleteComment {
    fn verb(&self) -> &'static str {
        "delete"
    }
    fn noun(&self) -> &'static str {
        "comment"
    }
    fn description(&self) -> &'static str {
        "Delete a comment from a task"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for DeleteComment {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut task = ctx.read_task(&self.task).await?;

            if task.find_comment(&self.comment).is_none() {
                return Err(WorklaneError::CommentNotFound {
                    id: self.comment.to_string(),
                });
            }

            task.comments.retain(|c| c.id != self.comment);
            ctx.write_task(&task).await?;
            Ok(serde_json::json!({ "id": self.comment, "deleted": true }))
        }
        .await;

        finish_logged(self, input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.task.to_string()]
    }
}
