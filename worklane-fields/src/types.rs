//! Core field types for the fields registry.
//!
//! All types serialize to/from YAML via serde. Field definitions describe
//! named, typed attributes of an editable record.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A single option in a select field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl SelectOption {
    /// Create an option with just a value
    pub fn new(value: impl Into<String>, order: i32) -> Self {
        Self {
            value: value.into(),
            label: None,
            color: None,
            order,
        }
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// The kind of a field — determines what shape the value takes and how
/// the editor commits it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single line of free text
    PlainText,
    /// Free text that may span lines
    MultiLineText,
    /// One value out of a fixed option list
    SingleSelect { options: Vec<SelectOption> },
    /// ISO-8601 calendar date (YYYY-MM-DD)
    Date,
    /// Reference to a board member by ID
    UserReference,
}

impl FieldKind {
    /// Whether edits to this kind commit immediately on selection change
    /// rather than waiting for an explicit confirm.
    pub fn commits_on_select(&self) -> bool {
        matches!(
            self,
            Self::SingleSelect { .. } | Self::Date | Self::UserReference
        )
    }

    /// The select options, if this kind carries any.
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::SingleSelect { options } => options,
            _ => &[],
        }
    }
}

/// A field definition — the complete schema for a single named attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    pub id: Ulid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl FieldDef {
    /// Create a definition with a fresh ULID
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: Ulid::new(),
            name: name.into(),
            description: None,
            kind,
            default: None,
            required: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the field as required (empty values rejected)
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
