//! SetTaskField command - single-attribute update used by the inline editor.
//!
//! Validates the staged value against the field's definition before any
//! write, then applies it to the owning task. Built-in fields map onto task
//! struct members; any other defined field lands in the task's custom field
//! map. Setting `status` is a move to the end of the target column.

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::task::ordinal_at_end;
use crate::types::{ColumnId, MemberId, Position, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_fields::ValidationEngine;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Set one editable field of a task
#[derive(Debug, Deserialize, Serialize)]
pub struct SetTaskField {
    /// The task ID
    pub id: TaskId,
    /// Field name ("title", "description", "status", "due", "assignee",
    /// or a custom defined field)
    pub field: String,
    /// The new value; empty clears optional fields
    pub value: String,
}

impl SetTaskField {
    /// Create a new SetTaskField command
    pub fn new(id: impl Into<TaskId>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Operation for SetTaskField {
    fn verb(&self) -> &'static str {
        "set-field"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Set one editable field of a task"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for SetTaskField {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut task = ctx.read_task(&self.id).await?;

            let def = ctx.field_def(&self.field).await?;
            let engine = ValidationEngine::new(ctx.member_lookup());
            engine.validate(&def, &self.value)?;

            match self.field.as_str() {
                "title" => {
                    task.title = self.value.clone();
                }
                "description" => {
                    task.description = self.value.clone();
                }
                "status" => {
                    let column = ColumnId::from_string(&self.value);
                    let ordinal = ordinal_at_end(ctx, &column, Some(&self.id)).await?;
                    task.position = Position::new(column, ordinal);
                }
                "due" => {
                    task.due = if self.value.trim().is_empty() {
                        None
                    } else {
                        // Format already validated against the definition
                        NaiveDate::parse_from_str(&self.value, "%Y-%m-%d").ok()
                    };
                }
                "assignee" => {
                    task.assignees = if self.value.trim().is_empty() {
                        Vec::new()
                    } else {
                        vec![MemberId::from_string(&self.value)]
                    };
                }
                other => {
                    if self.value.trim().is_empty() {
                        task.fields.remove(other);
                    } else {
                        task.fields.insert(other.to_string(), self.value.clone());
                    }
                }
            }

            ctx.write_task(&task).await?;
            Ok(serde_json::to_value(&task)?)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}
