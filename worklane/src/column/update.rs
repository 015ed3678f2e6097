//! UpdateColumn command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::ColumnId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Update a column's name or order
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateColumn {
    /// The column ID to update
    pub id: ColumnId,
    /// New display name
    pub name: Option<String>,
    /// New display order
    pub order: Option<usize>,
}

impl UpdateColumn {
    /// Create a new UpdateColumn command
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            order: None,
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the order
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }
}

impl Operation for UpdateColumn {
    fn verb(&self) -> &'static str {
        "update"
    }
    fn noun(&self) -> &'static str {
        "column"
    }
    fn description(&self) -> &'static str {
        "Update column properties"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for UpdateColumn {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut column = ctx.read_column(&self.id).await?;

            if let Some(name) = &self.name {
                column.name = name.clone();
            }
            if let Some(order) = self.order {
                column.order = order;
            }

            ctx.write_column(&column).await?;
            Ok(serde_json::to_value(&column)?)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}
