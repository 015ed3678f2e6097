//! The editor-to-storage binding.
//!
//! `TaskFieldGateway` is the persistence boundary the inline field editor
//! commits through: one `SetTaskField` dispatch per commit, with engine
//! errors surfaced as gateway failure messages. `open_field_editor` builds
//! an `EditSession` over a task's current state, wired to the board's
//! member lookup for reference validation.

use crate::context::WorklaneContext;
use crate::error::Result;
use crate::task::SetTaskField;
use crate::types::TaskId;
use tracing::warn;
use worklane_editor::{CommitGateway, EditSession, FieldIdentity, GatewayError};
use worklane_fields::ValidationEngine;
use worklane_operations::{async_trait, Execute};

/// Commits staged field values by dispatching `SetTaskField`
pub struct TaskFieldGateway<'a> {
    ctx: &'a WorklaneContext,
}

impl<'a> TaskFieldGateway<'a> {
    /// Create a gateway over a context
    pub fn new(ctx: &'a WorklaneContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl CommitGateway for TaskFieldGateway<'_> {
    async fn commit(
        &self,
        field: &FieldIdentity,
        value: &str,
    ) -> std::result::Result<(), GatewayError> {
        let op = SetTaskField::new(field.record.as_str(), field.field.as_str(), value);
        let (result, log_entry) = op.execute(self.ctx).await.split();

        if let Some(entry) = log_entry {
            // The write already landed; a failed audit append must not
            // turn a persisted commit into a reported failure.
            if let Err(err) = self.ctx.append_activity(&entry).await {
                warn!(error = %err, "failed to append activity entry for field commit");
            }
        }

        result
            .map(|_| ())
            .map_err(|err| GatewayError::new(err.to_string()))
    }
}

/// Build an edit session over one field of a task, staged from its current
/// stored value and validated against the live board (columns, members).
pub async fn open_field_editor(
    ctx: &WorklaneContext,
    task_id: &TaskId,
    field: &str,
) -> Result<EditSession> {
    let task = ctx.read_task(task_id).await?;
    let def = ctx.field_def(field).await?;

    let current = match field {
        "title" => task.title.clone(),
        "description" => task.description.clone(),
        "status" => task.position.column.to_string(),
        "due" => task
            .due
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        "assignee" => task
            .assignees
            .first()
            .map(|m| m.to_string())
            .unwrap_or_default(),
        other => task.fields.get(other).cloned().unwrap_or_default(),
    };

    let identity = FieldIdentity::new(task_id.as_str(), field);
    Ok(EditSession::new(identity, def, current)
        .with_validator(ValidationEngine::new(ctx.member_lookup())))
}
