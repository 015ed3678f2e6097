//! ListTimeEntries command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::types::{MemberId, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// List time entries with elapsed totals, optionally filtered by task
/// and/or member. Running entries count up to now.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListTimeEntries {
    /// Only entries for this task
    pub task: Option<TaskId>,
    /// Only entries by this member
    pub member: Option<MemberId>,
}

impl ListTimeEntries {
    /// Create a new ListTimeEntries command
    pub fn new() -> Self {
        Self {
            task: None,
            member: None,
        }
    }

    /// Filter by task
    pub fn with_task(mut self, task: impl Into<TaskId>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Filter by member
    pub fn with_member(mut self, member: impl Into<MemberId>) -> Self {
        self.member = Some(member.into());
        self
    }
}

impl Operation for ListTimeEntries {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "timer"
    }
    fn description(&self) -> &'static str {
        "List time entries with elapsed totals"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for ListTimeEntries {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let result: Result<Value> = async {
            let mut entries = ctx.read_all_time_entries().await?;

            if let Some(task) = &self.task {
                entries.retain(|e| &e.task == task);
            }
            if let Some(member) = &self.member {
                entries.retain(|e| &e.member == member);
            }
            entries.sort_by(|a, b| a.started_at.cmp(&b.started_at));

            let total_seconds: i64 = entries.iter().map(|e| e.elapsed_seconds()).sum();
            let values: Vec<Value> = entries
                .iter()
                .map(|e| {
                    let mut v = serde_json::to_value(e)?;
                    v["elapsed_seconds"] = serde_json::json!(e.elapsed_seconds());
                    Ok(v)
                })
                .collect::<Result<_>>()?;

            Ok(serde_json::json!({
                "entries": values,
                "total_seconds": total_seconds,
            }))
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
    use crate::member::AddMember;
    use crate::task::AddTask;
    use crate::timer::{StartTimer, StopTimer};
    use tempfile::TempDir;

    async fn setup() -> (TempDir, WorklaneContext, String, String) {
        let temp = TempDir::new().unwrap();
        let ctx = WorklaneContext::new(temp.path().join(".worklane"));
        InitBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        AddMember::new("alice", "Alice").execute(&ctx).await.into_result().unwrap();
        AddMember::new("bob", "Bob").execute(&ctx).await.into_result().unwrap();
        let a = AddTask::new("A").execute(&ctx).await.into_result().unwrap();
        let b = AddTask::new("B").execute(&ctx).await.into_result().unwrap();
        (
            temp,
            ctx,
            a["id"].as_str().unwrap().to_string(),
            b["id"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_list_entries_filters() {
        let (_temp, ctx, task_a, task_b) = setup().await;

        StartTimer::new(task_a.as_str(), "alice").execute(&ctx).await.into_result().unwrap();
        StopTimer::new("alice").execute(&ctx).await.into_result().unwrap();
        StartTimer::new(task_b.as_str(), "bob").execute(&ctx).await.into_result().unwrap();

        let all = ListTimeEntries::new().execute(&ctx).await.into_result().unwrap();
        assert_eq!(all["entries"].as_array().unwrap().len(), 2);

        let alice_only = ListTimeEntries::new()
            .with_member("alice")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(alice_only["entries"].as_array().unwrap().len(), 1);

        let task_b_only = ListTimeEntries::new()
            .with_task(task_b.as_str())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(task_b_only["entries"].as_array().unwrap().len(), 1);
        assert_eq!(task_b_only["entries"][0]["member"], "bob");
    }

    #[tokio::test]
    async fn test_total_includes_running_entries() {
        let (_temp, ctx, task_a, _task_b) = setup().await;

        StartTimer::new(task_a.as_str(), "alice").execute(&ctx).await.into_result().unwrap();

        let result = ListTimeEntries::new().execute(&ctx).await.into_result().unwrap();
        assert!(result["total_seconds"].as_i64().unwrap() >= 0);
        assert!(result["entries"][0]["elapsed_seconds"].is_i64());
    }
}
