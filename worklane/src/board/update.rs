//! UpdateBoard command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Update board metadata
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateBoard {
    /// New board name
    pub name: Option<String>,
    /// New description (None = don't change, Some(None) = clear)
    pub description: Option<Option<String>>,
}

impl UpdateBoard {
    /// Create a new UpdateBoard command
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }
}

impl Default for UpdateBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for UpdateBoard {
    fn verb(&self) -> &'static str {
        "update"
    }
    fn noun(&self) -> &'static str {
        "board"
    }
    fn description(&self) -> &'static str {
        "Update board metadata"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for UpdateBoard {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut board = ctx.read_board().await?;

            if let Some(name) = &self.name {
                board.name = name.clone();
            }
            if let Some(description) = &self.description {
                board.description = description.clone();
            }

            ctx.write_board(&board).await?;
            Ok(serde_json::to_value(&board)?)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}
