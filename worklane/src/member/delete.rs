//! DeleteMember command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::MemberId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Delete a member. Their task assignments are removed as well.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteMember {
    /// The member ID to delete
    pub id: MemberId,
}

impl DeleteMember {
    /// Create a new DeleteMember command
    pub fn new(id: impl Into<MemberId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for DeleteMember {
    fn verb(&self) -> &'static str {
        "delete"
    }
    fn noun(&self) -> &'static str {
        "member"
    }
    fn description(&self) -> &'static str {
        "Delete a member and unassign their tasks"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for DeleteMember {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let member = ctx.read_member(&self.id).await?;

            // Unassign from all tasks before removing the member file
            for mut task in ctx.read_all_tasks().await? {
                if task.assignees.contains(&self.id) {
                    task.assignees.retain(|a| a != &self.id);
                    ctx.write_task(&task).await?;
                }
            }

            ctx.delete_member_file(&self.id).await?;
            Ok(serde_json::json!({ "id": member.id, "deleted": true }))
        }
        .await;

        finish_logged(self, input, result, start)
    }
}
