//! StopTimer command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::MemberId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Stop the member's running timer
#[derive(Debug, Deserialize, Serialize)]
pub struct StopTimer {
    /// The member whose timer to stop
    pub member: MemberId,
}

impl StopTimer {
    /// Create a new StopTimer command
    pub fn new(member: impl Into<MemberId>) -> Self {
        Self {
            member: member.into(),
        }
    }
}

impl Operation for StopTimer {
    fn verb(&self) -> &'static str {
        "stop"
    }
    fn noun(&self) -> &'static str {
        "timer"
    }
    fn description(&self) -> &'static str {
        "Stop the running timer"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for StopTimer {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut entry = ctx
                .find_running_entry(&self.member)
                .await?
                .ok_or_else(|| WorklaneError::TimerNotRunning {
                    member: self.member.to_string(),
                })?;

            entry.stop();
            ctx.write_time_entry(&entry).await?;

            let mut value = serde_json::to_value(&entry)?;
            value["elapsed_seconds"] = serde_json::json!(entry.elapsed_seconds());
            Ok(value)
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
    use crate::timer::StartTimer;
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
    async fn test_stop_timer() {
        let (_temp, ctx, task_id) = setup().await;

        StartTimer::new(task_id.as_str(), "alice")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = StopTimer::new("alice").execute(&ctx).await.into_result().unwrap();
        assert!(result["stopped_at"].is_string());
        assert!(result["elapsed_seconds"].as_i64().unwrap() >= 0);

        // No running entry remains
        let result = StopTimer::new("alice").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(WorklaneError::TimerNotRunning { .. })));
    }

    #[tokio::test]
    async fn test_stop_timer_without_start() {
        let (_temp, ctx, _task_id) = setup().await;

        let result = StopTimer::new("alice").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(WorklaneError::TimerNotRunning { .. })));
    }
}
