//! MarkNotificationRead command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::NotificationId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Mark a notification as read
#[derive(Debug, Deserialize, Serialize)]
pub struct MarkNotificationRead {
    /// The notification ID
    pub id: NotificationId,
}

impl MarkNotificationRead {
    /// Create a new MarkNotificationRead command
    pub fn new(id: impl Into<NotificationId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for MarkNotificationRead {
    fn verb(&self) -> &'static str {
        "read"
    }
    fn noun(&self) -> &'static str {
        "notification"
    }
    fn description(&self) -> &'static str {
        "Mark a notification as read"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for MarkNotificationRead {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut notification = ctx.read_notification(&self.id).await?;
            notification.read = true;
            ctx.write_notification(&notification).await?;
            Ok(serde_json::to_value(&notification)?)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}
