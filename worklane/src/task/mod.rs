//! Task commands

mod add;
mod delete;
mod get;
mod list;
mod mv;
mod set_field;
mod update;

pub use add::AddTask;
pub use delete::DeleteTask;
pub use get::GetTask;
pub use list::ListTasks;
pub use mv::MoveTask;
pub use set_field::SetTaskField;
pub use update::UpdateTask;

pub(crate) use mv::ordinal_at_end;
