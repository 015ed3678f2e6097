//! Board-level types: Board, Column, Member

use super::ids::{ColumnId, MemberId};
use serde::{Deserialize, Serialize};

/// The board - just metadata (name + description).
/// Columns and members are stored as individual files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Board {
    /// Create a new board with the given name
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

    /// The default columns for a new board
    pub fn default_columns() -> Vec<Column> {
        vec![
            Column {
                id: ColumnId::from_string("todo"),
                name: "To Do".into(),
                order: 0,
            },
            Column {
                id: ColumnId::from_string("doing"),
                name: "Doing".into(),
                order: 1,
            },
            Column {
                id: ColumnId::from_string("done"),
                name: "Done".into(),
                order: 2,
            },
        ]
    }
}

/// A column defines a workflow stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    #[serde(skip_deserializing)]
    pub id: ColumnId,
    pub name: String,
    pub order: usize,
}

impl Column {
    /// Create a new column
    pub fn new(id: impl Into<ColumnId>, name: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
        }
    }
}

/// A member is a person who can be assigned to tasks and receive
/// notifications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    #[serde(skip_deserializing)]
    pub id: MemberId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Member {
    /// Create a new member
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new("Sprint 12").with_description("Two weeks");
        assert_eq!(board.name, "Sprint 12");
        assert_eq!(board.description.as_deref(), Some("Two weeks"));
    }

    #[test]
    fn test_default_columns() {
        let columns = Board::default_columns();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].id.as_str(), "todo");
        assert_eq!(columns[2].id.as_str(), "done");
        assert!(columns.windows(2).all(|w| w[0].order < w[1].order));
    }

    #[test]
    fn test_member_serialization_skips_missing_email() {
        let member = Member::new("alice", "Alice");
        let json = serde_json::to_string(&member).unwrap();
        assert!(!json.contains("email"));

        let member = member.with_email("alice@example.com");
        let json = serde_json::to_string(&member).unwrap();
        assert!(json.contains("alice@example.com"));
    }
}
