//! Notification types

use super::ids::{MemberId, NotificationId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification delivered to one member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    #[serde(skip_deserializing)]
    pub id: NotificationId,
    pub recipient: MemberId,
    pub message: String,
    /// The task this notification is about, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskId>,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification
    pub fn new(recipient: MemberId, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            recipient,
            message: message.into(),
            task: None,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Attach the task this notification refers to
    pub fn with_task(mut self, task: TaskId) -> Self {
        self.task = Some(task);
        self
    }
}
