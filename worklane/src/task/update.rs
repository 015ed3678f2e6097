//! UpdateTask command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::{MemberId, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Update an existing task
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateTask {
    /// The task ID to update
    pub id: TaskId,
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New due date (None = don't change, Some(None) = clear)
    pub due: Option<Option<NaiveDate>>,
    /// Replace all assignees
    pub assignees: Option<Vec<MemberId>>,
}

impl UpdateTask {
    /// Create a new UpdateTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            due: None,
            assignees: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set or clear the due date
    pub fn with_due(mut self, due: Option<NaiveDate>) -> Self {
        self.due = Some(due);
        self
    }

    /// Set the assignees (replaces all existing assignees)
    pub fn with_assignees(mut self, assignees: Vec<MemberId>) -> Self {
        self.assignees = Some(assignees);
        self
    }
}

impl Operation for UpdateTask {
    fn verb(&self) -> &'static str {
        "update"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Update task properties"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for UpdateTask {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut task = ctx.read_task(&self.id).await?;

            if let Some(assignees) = &self.assignees {
                for member in assignees {
                    if !ctx.member_exists(member) {
                        return Err(WorklaneError::MemberNotFound {
                            id: member.to_string(),
                        });
                    }
                }
            }

            if let Some(title) = &self.title {
                task.title = title.clone();
            }
            if let Some(description) = &self.description {
                task.description = description.clone();
            }
            if let Some(due) = self.due {
                task.due = due;
            }
            if let Some(assignees) = &self.assignees {
                task.assignees = assignees.clone();
            }

            ctx.write_task(&task).await?;
            Ok(serde_json::to_value(&task)?)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::member::AddMember;
    use crate::task::AddTask;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, WorklaneContext) {
        let temp = TempDir::new().unwrap();
        let ctx = WorklaneContext::new(temp.path().join(".worklane"));
        InitBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        (temp, ctx)
    }

    #[tokio::test]
    async fn test_update_task_title() {
        let (_temp, ctx) = setup().await;

        let added = AddTask::new("Original").execute(&ctx).await.into_result().unwrap();
        let task_id = added["id"].as_str().unwrap();

        let result = UpdateTask::new(task_id)
            .with_title("Updated")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["title"], "Updated");
    }

    #[tokio::test]
    async fn test_update_task_clear_due() {
        let (_temp, ctx) = setup().await;

        let due = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let added = AddTask::new("Task")
            .with_due(due)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let task_id = added["id"].as_str().unwrap();

        let result = UpdateTask::new(task_id)
            .with_due(None)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert!(result.get("due").is_none() || result["due"].is_null());
    }

    #[tokio::test]
    async fn test_update_task_assignees_validated() {
        let (_temp, ctx) = setup().await;

        let added = AddTask::new("Task").execute(&ctx).await.into_result().unwrap();
        let task_id = added["id"].as_str().unwrap();

        let result = UpdateTask::new(task_id)
            .with_assignees(vec![MemberId::from_string("ghost")])
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(WorklaneError::MemberNotFound { .. })));

        AddMember::new("alice", "Alice")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let result = UpdateTask::new(task_id)
            .with_assignees(vec![MemberId::from_string("alice")])
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["assignees"][0], "alice");
    }
}
