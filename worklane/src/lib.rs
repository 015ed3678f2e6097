//! Team project-management engine with file-backed storage
//!
//! This crate provides a task/kanban engine that stores all data as JSON
//! files in a `.worklane` directory. It's designed for git-friendly project
//! management with support for concurrent access via file locking, inline
//! field editing through a commit gateway, and in-process realtime
//! notification push.
//!
//! ## Overview
//!
//! - **One repo = one board** - The `.worklane` directory lives at the repo root
//! - **File-per-entity** - Tasks, columns, members, time entries, and
//!   notifications are individual files
//! - **Git-friendly** - Human-readable JSON/YAML, no binary formats
//! - **Audited** - Per-task JSONL logs and a global activity log track who
//!   changed what
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use worklane::{WorklaneContext, board::InitBoard, task::AddTask, Execute};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Initialize a new board
//! let ctx = WorklaneContext::new("/path/to/repo/.worklane");
//! InitBoard::new("My Project").execute(&ctx).await.into_result()?;
//!
//! // Add a task
//! let result = AddTask::new("Implement feature X")
//!     .with_description("Add the new feature")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! println!("Created task: {}", result["id"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Inline editing
//!
//! Editable task attributes go through the `worklane-editor` state machine:
//! [`gateway::open_field_editor`] builds a session over a field's current
//! value, and [`gateway::TaskFieldGateway`] persists commits via
//! [`task::SetTaskField`].
//!
//! ## Storage Structure
//!
//! ```text
//! repo/
//! └── .worklane/
//!     ├── board.json           # Board metadata
//!     ├── settings.yaml        # Theme and board defaults
//!     ├── tasks/
//!     │   ├── {id}.json        # Task state
//!     │   ├── {id}.jsonl       # Per-task operation log
//!     ├── columns/
//!     │   └── {id}.json        # Column state
//!     ├── members/
//!     │   └── {id}.json        # Member state
//!     ├── time/
//!     │   └── {id}.json        # Time entry state
//!     ├── notifications/
//!     │   └── {id}.json        # Notification state
//!     ├── fields/
//!     │   └── definitions/     # Field definitions (YAML)
//!     └── activity/
//!         └── current.jsonl    # Global operation log
//! ```
//!
//! Entity state files use JSON; operation logs use JSONL (one JSON object
//! per line, newest last on disk, returned newest first).

mod context;
mod defaults;
mod error;
mod events;
mod outcome;
mod processor;
mod settings;
pub mod types;

// Command modules
pub mod activity;
pub mod board;
pub mod column;
pub mod comment;
pub mod gateway;
pub mod member;
pub mod notification;
pub mod task;
pub mod timer;

// Re-export Execute trait and types from the operations crate
pub use worklane_operations::{async_trait, Execute, ExecutionResult, LogEntry, Operation};

pub use context::{WorklaneContext, WorklaneLock};
pub use defaults::builtin_fields;
pub use error::{Result, WorklaneError};
pub use events::{BoardEvent, EventBus, Subscription};
pub use processor::WorklaneProcessor;
pub use settings::{Settings, Theme};

// Re-export commonly used types
pub use types::{
    Board, Column, ColumnId, Comment, CommentId, Member, MemberId, Notification, NotificationId,
    Ordinal, Position, Task, TaskId, TimeEntry, TimeEntryId,
};
