//! # Worklane Operations
//!
//! This crate provides the `Operation` trait for defining engine operations.
//! Operations are structs where the fields ARE the parameters - no duplication.
//!
//! ## Example
//!
//! ```ignore
//! use worklane_operations::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct AddTask {
//!     /// The task title
//!     pub title: String,
//!     /// Optional description
//!     pub description: Option<String>,
//! }
//!
//! impl Operation for AddTask {
//!     fn verb(&self) -> &'static str { "add" }
//!     fn noun(&self) -> &'static str { "task" }
//!     fn description(&self) -> &'static str { "Create a new task" }
//! }
//!
//! #[async_trait]
//! impl Execute<WorklaneContext, WorklaneError> for AddTask {
//!     async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
//!         // implementation returns ExecutionResult::Logged or Unlogged
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
