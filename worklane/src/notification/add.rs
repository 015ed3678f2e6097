//! AddNotification command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::events::BoardEvent;
use crate::outcome::finish_logged;
use crate::settings::Settings;
use crate::types::{MemberId, Notification, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Insert a notification for a member and push it to their live
/// subscriptions
#[derive(Debug, Deserialize, Serialize)]
pub struct AddNotification {
    /// The recipient member
    pub recipient: MemberId,
    /// Notification message
    pub message: String,
    /// The task this notification is about, if any
    pub task: Option<TaskId>,
}

impl AddNotification {
    /// Create a new AddNotification command
    pub fn new(recipient: impl Into<MemberId>, message: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: message.into(),
            task: None,
        }
    }

    /// Attach the task this notification refers to
    pub fn with_task(mut self, task: impl Into<TaskId>) -> Self {
        self.task = Some(task.into());
        self
    }
}

impl Operation for AddNotification {
    fn verb(&self) -> &'static str {
        "add"
    }
    fn noun(&self) -> &'static str {
        "notification"
    }
    fn description(&self) -> &'static str {
        "Insert a notification and push it to subscribers"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for AddNotification {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            if !ctx.member_exists(&self.recipient) {
                return Err(WorklaneError::MemberNotFound {
                    id: self.recipient.to_string(),
                });
            }

            let settings = Settings::load(ctx.settings_path()).await?;
            if !settings.notifications_enabled {
                debug!(recipient = %self.recipient, "notifications disabled, skipping");
                return Ok(serde_json::json!({ "skipped": true }));
            }

            let mut notification = Notification::new(self.recipient.clone(), &self.message);
            if let Some(task) = &self.task {
                notification = notification.with_task(task.clone());
            }

            // Persist first; subscribers only ever see stored notifications
            ctx.write_notification(&notification).await?;
            let delivered = ctx.events().publish(
                &self.recipient,
                BoardEvent::NotificationAdded(notification.clone()),
            );
            debug!(recipient = %self.recipient, delivered, "notification pushed");

            Ok(serde_json::to_value(&notification)?)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}
