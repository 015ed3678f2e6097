//! AddMember command

use crate::context::WorklaneContext;
use crate::error::{Result, WorklaneError};
use crate::outcome::finish_logged;
use crate::types::{Member, MemberId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklane_operations::{async_trait, Execute, ExecutionResult, Operation};

/// Add a board member
#[derive(Debug, Deserialize, Serialize)]
pub struct AddMember {
    /// Member ID (slug, e.g. "alice")
    pub id: MemberId,
    /// Display name
    pub name: String,
    /// Email address
    pub email: Option<String>,
}

impl AddMember {
    /// Create a new AddMember command
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
        }
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl Operation for AddMember {
    fn verb(&self) -> &'static str {
        "add"
    }
    fn noun(&self) -> &'static str {
        "member"
    }
    fn description(&self) -> &'static str {
        "Add a board member"
    }
}

#[async_trait]
impl Execute<WorklaneContext, WorklaneError> for AddMember {
    async fn execute(&self, ctx: &WorklaneContext) -> ExecutionResult<Value, WorklaneError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            if ctx.member_exists(&self.id) {
                return Err(WorklaneError::duplicate_id("member", self.id.as_str()));
            }

            let mut member = Member::new(self.id.clone(), &self.name);
            if let Some(email) = &self.email {
                member = member.with_email(email);
            }

            ctx.write_member(&member).await?;
            Ok(serde_json::to_value(&member)?)
        }
        .await;

        finish_logged(self, input, result, start)
    }
}
