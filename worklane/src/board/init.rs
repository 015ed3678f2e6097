//! InitBoard command

use crate::context::WorklaneContext;
use crate::error::WorklaneError;
use crate::outcome::finish_logged;
use crate::types::Board;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Initialize a new board
#[derive(Debug, Deserialize, Serialize)]
pub struct InitBoard {
    /// The board name
    pub name: String,
    /// Optional board description
    pub description: Option<String>,
}

impl InitBoard {
    /// Create a new InitBoard command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Operation for InitBoard {
    fn verb(&self) -> &'static str {
        "init"
    }
    fn noun(&self) -> &'static str {
        "board"
    }
    fn description(&self) -> &'static str {
        "Initialize a new board"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for InitBoard {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result = async {
            if ctx.is_initialized() {
                return Err(WorklaneError::AlreadyExists {
                    path: ctx.root().to_path_buf(),
                });
            }

            ctx.create_directories().await?;

            let mut board = Board::new(&self.name);
            if let Some(desc) = &self.description {
                board = board.with_description(desc);
            }

            ctx.write_board(&board).await?;

            // Write default columns as individual files
            for column in Board::default_columns() {
                ctx.write_column(&column).await?;
            }

            let mut result = serde_json::to_value(&board)?;
            result["columns"] = serde_json::to_value(Board::default_columns())?;
            Ok(result)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}
