//! GetMember command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::types::MemberId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Get a member by ID
#[derive(Debug, Deserialize, Serialize)]
pub struct GetMember {
    /// The member ID
    pub id: MemberId,
}

impl GetMember {
    /// Create a new GetMember command
    pub fn new(id: impl Into<MemberId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for GetMember {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "member"
    }
    fn description(&self) -> &'static str {
        "Get a member by ID"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for GetMember {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let result: Result<Value> = async {
            let member = ctx.read_member(&self.id).await?;
            Ok(serde_json::to_value(&member)?)
        }
        .await;

        match result {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error,
                log_entry: None,
            },
        }
    }
}
