//! Commit policy: which user inputs persist a staged edit, per field kind.
//!
//! Free-text fields keep friction high (explicit confirm or focus loss, and
//! only when something changed) so partial edits aren't persisted per
//! keystroke. Discrete choices keep friction low: picking a value applies it.

use worklane_fields::FieldKind;

/// User inputs the editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorInput {
    /// Activate editing on a viewed field
    Activate,
    /// Replace the staged text with a new local value
    Input(String),
    /// Confirm key; `with_modifier` is the line-break modifier
    Confirm { with_modifier: bool },
    /// A choice was picked in a select/date/reference editor
    Select(String),
    /// The editor lost focus
    Blur,
    /// Escape/cancel
    Escape,
}

/// What an input means for the staged edit, given the field kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditDecision {
    /// Stage a new local value; no persistence
    Stage(String),
    /// Stage the value and commit it immediately
    StageAndCommit(String),
    /// Commit the currently staged value
    Commit,
    /// Append a line break to the staged value
    LineBreak,
    /// Return to viewing, discarding the staged value
    Cancel,
    /// No effect
    Ignore,
}

/// Kind-dependent commit rules. Stateless; the session supplies `dirty`
/// (staged differs from committed).
pub struct CommitPolicy;

impl CommitPolicy {
    /// Decide what an input does while the field is in edit mode.
    pub fn decide(kind: &FieldKind, input: &EditorInput, dirty: bool) -> EditDecision {
        match input {
            EditorInput::Escape => EditDecision::Cancel,

            EditorInput::Input(value) => {
                if kind.commits_on_select() {
                    EditDecision::Ignore
                } else {
                    EditDecision::Stage(value.clone())
                }
            }

            EditorInput::Select(value) => {
                if kind.commits_on_select() {
                    EditDecision::StageAndCommit(value.clone())
                } else {
                    EditDecision::Ignore
                }
            }

            EditorInput::Confirm { with_modifier } => {
                if kind.commits_on_select() {
                    return EditDecision::Ignore;
                }
                if *with_modifier {
                    if matches!(kind, FieldKind::MultiLineText) {
                        EditDecision::LineBreak
                    } else {
                        EditDecision::Ignore
                    }
                } else if dirty {
                    EditDecision::Commit
                } else {
                    EditDecision::Cancel
                }
            }

            EditorInput::Blur => {
                if kind.commits_on_select() {
                    // Selection change is the only commit trigger for
                    // choice kinds; losing focus abandons the edit.
                    EditDecision::Cancel
                } else if dirty {
                    EditDecision::Commit
                } else {
                    EditDecision::Cancel
                }
            }

            // Activation is a viewing-mode concern; meaningless mid-edit.
            EditorInput::Activate => EditDecision::Ignore,
        }
    }
}
