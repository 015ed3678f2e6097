//! Task types: Task, Comment

use super::ids::{CommentId, MemberId, TaskId};
use super::position::Position;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A task/card on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(skip_deserializing)]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,

    /// Position = column + ordinal
    pub position: Position,

    /// Due date, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,

    /// Members assigned to this task
    #[serde(default)]
    pub assignees: Vec<MemberId>,

    /// Comments/discussion thread
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// Additional field values keyed by field name (custom fields)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl Task {
    /// Create a new task with the given title and position
    pub fn new(title: impl Into<String>, position: Position) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            position,
            due: None,
            assignees: Vec::new(),
            comments: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the due date
    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    /// Set assignees
    pub fn with_assignees(mut self, assignees: Vec<MemberId>) -> Self {
        self.assignees = assignees;
        self
    }

    /// Find a comment by ID
    pub fn find_comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == id)
    }

    /// Find a comment by ID (mutable)
    pub fn find_comment_mut(&mut self, id: &CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| &c.id == id)
    }
}

/// A comment on a task - part of the discussion thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    pub author: MemberId,
    // Timestamps are derived from the per-task operation log
}

impl Comment {
    /// Create a new comment
    pub fn new(body: impl Into<String>, author: MemberId) -> Self {
        Self {
            id: CommentId::new(),
            body: body.into(),
            author,
        }
    }
}
