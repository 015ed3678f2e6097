//! WorklaneProcessor - runs operations and routes their log entries.
//!
//! Commands produce `ExecutionResult`s with optional log entries; the
//! processor appends them to the global activity log and, for task-scoped
//! operations, to the per-task log. Using `execute` directly skips logging.

use crate::context::WorklaneContext;
use crate::error::Result;
use crate::error::WorklaneError;
use crate::types::TaskId;
use serde_json::Value;
use worklane_operations::Execute;

/// Executes operations against a context, persisting their audit trail
pub struct WorklaneProcessor<'a> {
    ctx: &'a WorklaneContext,
    actor: Option<String>,
}

impl<'a> WorklaneProcessor<'a> {
    /// Create a processor over a context
    pub fn new(ctx: &'a WorklaneContext) -> Self {
        Self { ctx, actor: None }
    }

    /// Stamp every log entry with this actor
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Run an operation, append its log entries, and return its value
    pub async fn run<O>(&self, op: &O) -> Result<Value>
    where
        O: Execute<WorklaneContext, WorklaneError> + Sync,
    {
        let result = op.execute(self.ctx).await;
        let (value, log_entry) = result.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry.actor = Some(actor.clone());
            }
            self.ctx.append_activity(&entry).await?;

            // Task-scoped entries also land in the per-task log
            if matches!(op.noun(), "task" | "comment") {
                if let Ok(value) = &value {
                    for id in op.affected_resource_ids(value) {
                        self.ctx
                            .append_task_log(&TaskId::from_string(id), &entry)
                            .await?;
                    }
                }
            }
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::task::{AddTask, GetTask, UpdateTask};
    use tempfile::TempDir;

    async fn setup() -> (TempDir, WorklaneContext) {
        let temp = TempDir::new().unwrap();
        let ctx = WorklaneContext::new(temp.path().join(".worklane"));
        (temp, ctx)
    }

    #[tokio::test]
    async fn test_run_appends_activity() {
        let (_temp, ctx) = setup().await;
        let processor = WorklaneProcessor::new(&ctx).with_actor("alice");

        processor.run(&InitBoard::new("Test")).await.unwrap();

        let entries = ctx.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].op, "init board");
        assert_eq!(entries[0].actor.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_task_operations_land_in_task_log() {
        let (_temp, ctx) = setup().await;
        let processor = WorklaneProcessor::new(&ctx);

        processor.run(&InitBoard::new("Test")).await.unwrap();
        let added = processor.run(&AddTask::new("Task")).await.unwrap();
        let task_id = TaskId::from_string(added["id"].as_str().unwrap());

        processor
            .run(&UpdateTask::new(task_id.clone()).with_title("Renamed"))
            .await
            .unwrap();

        let log = ctx.read_task_log(&task_id, None).await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].op, "update task");
        assert_eq!(log[1].op, "add task");
    }

    #[tokio::test]
    async fn test_read_operations_are_not_logged() {
        let (_temp, ctx) = setup().await;
        let processor = WorklaneProcessor::new(&ctx);

        processor.run(&InitBoard::new("Test")).await.unwrap();
        let added = processor.run(&AddTask::new("Task")).await.unwrap();
        processor
            .run(&GetTask::new(added["id"].as_str().unwrap()))
            .await
            .unwrap();

        let entries = ctx.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 2); // init + add, no get
    }

    #[tokio::test]
    async fn test_failures_are_logged_too() {
        let (_temp, ctx) = setup().await;
        let processor = WorklaneProcessor::new(&ctx);

        processor.run(&InitBoard::new("Test")).await.unwrap();
        let result = processor
            .run(&UpdateTask::new("missing").with_title("X"))
            .await;
        assert!(result.is_err());

        let entries = ctx.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].output["error"]
            .as_str()
            .unwrap()
            .contains("task not found"));
    }
}
