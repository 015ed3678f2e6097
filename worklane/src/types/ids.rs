//! ID newtypes for worklane entities.
//!
//! Generated IDs are ULIDs; columns and members typically use
//! human-readable slugs supplied by the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh ULID-based ID
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an existing ID string
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// The ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_string(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id! {
    /// Identifies a task
    TaskId
}
define_id! {
    /// Identifies a column (workflow stage); usually a slug like "todo"
    ColumnId
}
define_id! {
    /// Identifies a board member; usually a slug like "alice"
    MemberId
}
define_id! {
    /// Identifies a comment on a task
    CommentId
}
define_id! {
    /// Identifies a time-tracking entry
    TimeEntryId
}
define_id! {
    /// Identifies a notification
    NotificationId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(TaskId::new(), TaskId::new());
    }

    #[test]
    fn test_from_string_round_trip() {
        let id = ColumnId::from_string("todo");
        assert_eq!(id.as_str(), "todo");
        assert_eq!(id.to_string(), "todo");
    }

    #[test]
    fn test_serde_transparent() {
        let id = MemberId::from_string("alice");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"alice\"");
        let parsed: MemberId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
