//! Notification commands

mod add;
mod list;
mod mark_read;

pub use add::AddNotification;
pub use list::ListNotifications;
pub use mark_read::MarkNotificationRead;
