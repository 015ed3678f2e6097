//! AddComment command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::{Comment, MemberId, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Add a comment to a task's discussion thread
#[derive(Debug, Deserialize, Serialize)]
pub struct AddComment {
    /// The task to comment on
    pub task: TaskId,
    /// Comment body
    pub body: String,
    /// Comment author
    pub author: MemberId,
}

impl AddComment {
    /// Create a new AddComment command
    pub fn new(
        task: impl Into<TaskId>,
        body: impl Into<String>,
        author: impl Into<MemberId>,
    ) -> Self {
        Self {
            task: task.into(),
            body: body.into(),
            author: author.into(),
        }
    }
}

impl Operation for AddComment {
    fn verb(&self) -> &'static str {
        "add"
    }
    fn noun(&self) -> &'static str {
        "comment"
    }
    fn description(&self) -> &'static str {
        "Add a comment to a task"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for AddComment {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            if !ctx.member_exists(&self.author) {
                return Err(WorklaneError::MemberNotFound {
                    id: self.author.to_string(),
                });
            }

            let mut task = ctx.read_task(&self.task).await?;
            let comment = Comment::new(&self.body, self.author.clone());
            task.comments.push(comment.clone());
            ctx.write_task(&task).await?;

            let mut value = serde_json::to_value(&comment)?;
            value["task"] = serde_json::to_value(&task.id)?;
            Ok(value)
        }
        .await;

        finish_logged(self, input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.task.to_string()]
    }
}
