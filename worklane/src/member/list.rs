//! ListMembers command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// List all board members
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListMembers {}

impl ListMembers {
    /// Create a new ListMembers command
    pub fn new() -> Self {
        Self {}
    }
}

impl Operation for ListMembers {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "member"
    }
    fn description(&self) -> &'static str {
        "List all board members"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for ListMembers {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let result: Result<Value> = async {
            let mut members = ctx.read_all_members().await?;
            members.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(serde_json::to_value(&members)?)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::member::AddMember;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_members_sorted() {
        let temp = TempDir::new().unwrap();
        let ctx = WorklaneContext::new(temp.path().join(".worklane"));
        InitBoard::new("Test").execute(&ctx).await.into_result().unwrap();

        AddMember::new("bob", "Bob").execute(&ctx).await.into_result().unwrap();
        AddMember::new("alice", "Alice").execute(&ctx).await.into_result().unwrap();

        let result = ListMembers::new().execute(&ctx).await.into_result().unwrap();
        let ids: Vec<&str> = result
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["alice", "bob"]);
    }
}
