//! Time-tracking types

use super::ids::{MemberId, TaskId, TimeEntryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-tracking entry: one member's work interval on one task.
///
/// At most one entry per member is running (no `stopped_at`) at a time;
/// starting a new timer stops the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeEntry {
    #[serde(skip_deserializing)]
    pub id: TimeEntryId,
    pub task: TaskId,
    pub member: MemberId,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<DateTime<Utc>>,
}

impl TimeEntry {
    /// Start a new entry now
    pub fn start(task: TaskId, member: MemberId) -> Self {
        Self {
            id: TimeEntryId::new(),
            task,
            member,
            started_at: Utc::now(),
            stopped_at: None,
        }
    }

    /// Whether the entry is still running
    pub fn is_running(&self) -> bool {
        self.stopped_at.is_none()
    }

    /// Stop the entry now
    pub fn stop(&mut self) {
        self.stopped_at = Some(Utc::now());
    }

    /// Elapsed seconds; running entries are measured against now
    pub fn elapsed_seconds(&self) -> i64 {
        let end = self.stopped_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_seconds()
    }
}
