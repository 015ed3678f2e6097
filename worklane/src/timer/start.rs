//! StartTimer command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::{MemberId, TaskId, TimeEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Start tracking time on a task.
///
/// A member tracks at most one task at a time; any entry already running
/// for them is stopped first.
#[derive(Debug, Deserialize, Serialize)]
pub struct StartTimer {
    /// The task to track
    pub task: TaskId,
    /// The member tracking time
    pub member: MemberId,
}

impl StartTimer {
    /// Create a new StartTimer command
    pub fn new(task: impl Into<TaskId>, member: impl Into<MemberId>) -> Self {
        Self {
            task: task.into(),
            member: member.into(),
        }
    }
}

impl Operation for StartTimer {
    fn verb(&self) -> &'static str {
        "start"
    }
    fn noun(&self) -> &'static str {
        "timer"
    }
    fn description(&self) -> &'static str {
        "Start tracking time on a task"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for StartTimer {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            // Both ends must exist before an interval is recorded
            let task = ctx.read_task(&self.task).await?;
            if !ctx.member_exists(&self.member) {
                return Err(WorklaneError::MemberNotFound {
                    id: self.member.to_string(),
                });
            }

            if let Some(mut running) = ctx.find_running_entry(&self.member).await? {
                debug!(member = %self.member, entry = %running.id, "stopping running entry");
                running.stop();
                ctx.write_time_entry(&running).await?;
            }

            let entry = TimeEntry::start(task.id.clone(), self.member.clone());
            ctx.write_time_entry(&entry).await?;
            Ok(serde_json::to_value(&entry)?)
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

    async fn setup() -> (TempDir, WorklaneContext, String) {
        let temp = TempDir::new().unwrap();
        let ctx = WorklaneContext::new(temp.path().join(".worklane"));
        InitBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        AddMember::new("alice", "Alice").execute(&ctx).await.into_result().unwrap();
        let added = AddTask::new("Task").execute(&ctx).await.into_result().unwrap();
        let id = added["id"].as_str().unwrap().to_string();
        (temp, ctx, id)
    }

    #[tokio::test]
    async fn test_start_timer() {
        let (_temp, ctx, task_id) = setup().await;

        let result = StartTimer::new(task_id.as_str(), "alice")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["member"], "alice");
        assert!(result["stopped_at"].is_null() || result.get("stopped_at").is_none());
    }

    #[tokio::test]
    async fn test_start_timer_stops_previous() {
        let (_temp, ctx, task_id) = setup().await;

        let other = AddTask::new("Other").execute(&ctx).await.into_result().unwrap();

        StartTimer::new(task_id.as_str(), "alice")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        StartTimer::new(other["id"].as_str().unwrap(), "alice")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let entries = ctx.read_all_time_entries().await.unwrap();
        let running: Vec<_> = entries.iter().filter(|e| e.is_running()).collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].task.as_str(), other["id"].as_str().unwrap());
    }

    #[tokio::test]
    async fn test_start_timer_unknown_task() {
        let (_temp, ctx, _task_id) = setup().await;

        let result = StartTimer::new("missing", "alice").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(WorklaneError::TaskNotFound { .. })));
    }

    #[tokio::test]
    async fn test_start_timer_unknown_member() {
        let (_temp, ctx, task_id) = setup().await;

        let result = StartTimer::new(task_id.as_str(), "ghost").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(WorklaneError::MemberNotFound { .. })));
    }
}
