//! Error types for the worklane engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type for worklane operations
pub type Result<T> = std::result::Result<T, WorklaneError>;

/// Errors that can occur in worklane operations
#[derive(Debug, Error)]
pub enum WorklaneError {
    /// Board not initialized at the given path
    #[error("board not initialized at {path}")]
    NotInitialized { path: PathBuf },

    /// Board already exists
    #[error("board already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Member not found
    #[error("member not found: {id}")]
    MemberNotFound { id: String },

    /// Comment not found
    #[error("comment not found: {id}")]
    CommentNotFound { id: String },

    /// Notification not found
    #[error("notification not found: {id}")]
    NotificationNotFound { id: String },

    /// Time entry not found
    #[error("time entry not found: {id}")]
    TimeEntryNotFound { id: String },

    /// No running timer to stop
    #[error("no running timer for member: {member}")]
    TimerNotRunning { member: String },

    /// Column has tasks and cannot be deleted
    #[error("column '{id}' has {count} tasks and cannot be deleted")]
    ColumnNotEmpty { id: String, count: usize },

    /// Duplicate ID
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Lock is held by another process
    #[error("lock busy - another operation in progress")]
    LockBusy,

    /// Field schema or validation error
    #[error(transparent)]
    Fields(#[from] worklane_fields::FieldsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error (settings files)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl WorklaneError {
    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockBusy)
    }
}
