//! AddTask command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::settings::Settings;
use crate::task::ordinal_at_end;
use crate::types::{ColumnId, MemberId, Position, Task};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Create a new task
#[derive(Debug, Deserialize, Serialize)]
pub struct AddTask {
    /// The task title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Target column (default: settings default, then first column)
    pub column: Option<ColumnId>,
    /// Due date
    pub due: Option<NaiveDate>,
    /// Assigned members
    pub assignees: Option<Vec<MemberId>>,
}

impl AddTask {
    /// Create a new AddTask command
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            column: None,
            due: None,
            assignees: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the target column
    pub fn with_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Set the due date
    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    /// Set the assignees
    pub fn with_assignees(mut self, assignees: Vec<MemberId>) -> Self {
        self.assignees = Some(assignees);
        self
    }
}

impl Operation for AddTask {
    fn verb(&self) -> &'static str {
        "add"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Create a new task"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for AddTask {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            ctx.ensure_directories().await?;

            let column = match &self.column {
                Some(column) => {
                    if !ctx.column_exists(column) {
                        return Err(WorklaneError::ColumnNotFound {
                            id: column.to_string(),
                        });
                    }
                    column.clone()
                }
                None => {
                    let settings = Settings::load(ctx.settings_path()).await?;
                    match settings.default_column {
                        Some(id) => ColumnId::from_string(id),
                        None => {
                            let columns = ctx.read_all_columns().await?;
                            columns
                                .first()
                                .map(|c| c.id.clone())
                                .ok_or(WorklaneError::NotInitialized {
                                    path: ctx.root().to_path_buf(),
                                })?
                        }
                    }
                }
            };

            if let Some(assignees) = &self.assignees {
                for member in assignees {
                    if !ctx.member_exists(member) {
                        return Err(WorklaneError::MemberNotFound {
                            id: member.to_string(),
                        });
                    }
                }
            }

            let ordinal = ordinal_at_end(ctx, &column, None).await?;
            let mut task = Task::new(&self.title, Position::new(column, ordinal));
            if let Some(description) = &self.description {
                task = task.with_description(description);
            }
            if let Some(due) = self.due {
                task = task.with_due(due);
            }
            if let Some(assignees) = &self.assignees {
                task = task.with_assignees(assignees.clone());
            }

            ctx.write_task(&task).await?;
            Ok(serde_json::to_value(&task)?)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}
