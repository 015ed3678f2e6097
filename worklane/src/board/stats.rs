//! BoardStats command - aggregates for the admin dashboard

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Aggregate board statistics: task counts per column, member count,
/// unread notifications, total tracked time
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BoardStats {}

impl BoardStats {
    /// Create a new BoardStats command
    pub fn new() -> Self {
        Self {}
    }
}

impl Operation for BoardStats {
    fn verb(&self) -> &'static str {
        "stats"
    }
    fn noun(&self) -> &'static str {
        "board"
    }
    fn description(&self) -> &'static str {
        "Aggregate board statistics"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for BoardStats {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let result: Result<Value> = async {
            let columns = ctx.read_all_columns().await?;
            let tasks = ctx.read_all_tasks().await?;
            let members = ctx.read_all_members().await?;
            let notifications = ctx.read_all_notifications().await?;
            let time_entries = ctx.read_all_time_entries().await?;

            let mut per_column: BTreeMap<String, usize> = columns
                .iter()
                .map(|c| (c.id.to_string(), 0))
                .collect();
            for task in &tasks {
                *per_column
                    .entry(task.position.column.to_string())
                    .or_insert(0) += 1;
            }

            let unread = notifications.iter().filter(|n| !n.read).count();
            let tracked_seconds: i64 = time_entries.iter().map(|e| e.elapsed_seconds()).sum();

            Ok(serde_json::json!({
                "tasks": tasks.len(),
                "tasks_per_column": per_column,
                "members": members.len(),
                "unread_notifications": unread,
                "tracked_seconds": tracked_seconds,
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
