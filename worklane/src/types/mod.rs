//! Core types for the worklane engine

mod board;
mod ids;
mod notification;
mod position;
mod task;
mod time;

// Re-export all types
pub use board::{Board, Column, Member};
pub use ids::{ColumnId, CommentId, MemberId, NotificationId, TaskId, TimeEntryId};
pub use notification::Notification;
pub use position::{Ordinal, Position};
pub use task::{Comment, Task};
pub use time::TimeEntry;
