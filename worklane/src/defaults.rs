//! Built-in field definitions seeded into new boards.
//!
//! The `status` field is intentionally absent: it is derived from the live
//! column set by `WorklaneContext::field_def`.

use worklane_fields::{FieldDef, FieldDefaults, FieldKind};

/// Default editable fields for tasks
pub fn builtin_fields() -> FieldDefaults {
    FieldDefaults::new()
        .field(
            FieldDef::new("title", FieldKind::PlainText)
                .with_description("Card headline")
                .required(),
        )
        .field(
            FieldDef::new("description", FieldKind::MultiLineText)
                .with_description("Longer details, may span lines"),
        )
        .field(FieldDef::new("due", FieldKind::Date).with_description("Due date"))
        .field(
            FieldDef::new("assignee", FieldKind::UserReference)
                .with_description("Member responsible for the task"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_fields() {
        let defaults = builtin_fields();
        let names: Vec<&str> = defaults.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["title", "description", "due", "assignee"]);

        let title = &defaults.fields()[0];
        assert!(title.required);
        assert_eq!(title.kind, FieldKind::PlainText);
    }

    #[test]
    fn test_status_is_not_seeded() {
        assert!(!builtin_fields().fields().iter().any(|f| f.name == "status"));
    }
}
