//! ListNotifications command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::types::MemberId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// List a member's notifications, newest first
#[derive(Debug, Deserialize, Serialize)]
pub struct ListNotifications {
    /// The recipient member
    pub recipient: MemberId,
    /// Only unread notifications
    #[serde(default)]
    pub unread_only: bool,
}

impl ListNotifications {
    /// Create a new ListNotifications command
    pub fn new(recipient: impl Into<MemberId>) -> Self {
        Self {
            recipient: recipient.into(),
            unread_only: false,
        }
    }

    /// Only return unread notifications
    pub fn unread_only(mut self) -> Self {
        self.unread_only = true;
        self
    }
}

impl Operation for ListNotifications {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "notification"
    }
    fn description(&self) -> &'static str {
        "List a member's notifications"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for ListNotifications {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let result: Result<Value> = async {
            let mut notifications = ctx.read_all_notifications().await?;
            notifications.retain(|n| n.recipient == self.recipient);
            if self.unread_only {
                notifications.retain(|n| !n.read);
            }
            notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            Ok(serde_json::to_value(&notifications)?)
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
