//! Shared plumbing for mutating commands.

use crate::error::{Result, WorklaneError};
use serde_json::Value;
use std::time::Instant;
use worklane_operations::{ExecutionResult, LogEntry, Operation};

/// Wrap a mutating command body's outcome in a timed, logged execution
/// result. Successes log the output value; failures log the error message.
pub(crate) fn finish_logged(
    op: &dyn Operation,
    input: Value,
    result: Result<Value>,
    start: Instant,
) -> ExecutionResult<Value, WorklaneError> {
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(value) => ExecutionResult::Logged {
            value: value.clone(),
            log_entry: LogEntry::new(op.op_string(), input, value, None, duration_ms),
        },
        Err(error) => {
            let error_msg = error.to_string();
            ExecutionResult::Failed {
                error,
                log_entry: Some(LogEntry::new(
                    op.op_string(),
                    input,
                    serde_json::json!({ "error": error_msg }),
                    None,
                    duration_ms,
                )),
            }
        }
    }
}
