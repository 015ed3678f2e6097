//! Synchronous validation of staged field values.
//!
//! Validation runs before any persistence call is attempted; a failed
//! validation never reaches storage. All checks are native and synchronous.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{FieldsError, Result};
use crate::types::{FieldDef, FieldKind};

/// Lookup seam for validating user-reference values.
///
/// Consumers implement this against their member store.
pub trait MemberLookup: Send + Sync {
    /// Whether a member with this ID exists
    fn member_exists(&self, id: &str) -> bool;
}

/// A lookup that accepts every member ID. Useful as a default and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllMembers;

impl MemberLookup for AllowAllMembers {
    fn member_exists(&self, _id: &str) -> bool {
        true
    }
}

/// Validates staged values against field definitions.
pub struct ValidationEngine {
    members: Arc<dyn MemberLookup>,
}

impl ValidationEngine {
    /// Create an engine with the given member lookup
    pub fn new(members: Arc<dyn MemberLookup>) -> Self {
        Self { members }
    }

    /// Validate a staged value against a field definition.
    ///
    /// An empty value is accepted for non-required fields (it clears the
    /// field) and rejected for required ones; kind checks only run on
    /// non-empty values.
    pub fn validate(&self, def: &FieldDef, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            if def.required {
                return Err(FieldsError::validation(&def.name, "value is required"));
            }
            return Ok(());
        }

        match &def.kind {
            FieldKind::PlainText => {
                if value.contains('\n') {
                    return Err(FieldsError::validation(
                        &def.name,
                        "line breaks are not allowed",
                    ));
                }
            }
            FieldKind::MultiLineText => {}
            FieldKind::SingleSelect { options } => {
                if !options.iter().any(|o| o.value == value) {
                    return Err(FieldsError::validation(
                        &def.name,
                        format!("'{}' is not one of the available options", value),
                    ));
                }
            }
            FieldKind::Date => {
                if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                    return Err(FieldsError::validation(
                        &def.name,
                        format!("'{}' is not a date (expected YYYY-MM-DD)", value),
                    ));
                }
            }
            FieldKind::UserReference => {
                if !self.members.member_exists(value) {
                    return Err(FieldsError::validation(
                        &def.name,
                        format!("unknown member: {}", value),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(Arc::new(AllowAllMembers))
    }
}
