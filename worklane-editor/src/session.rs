//! The per-field edit session state machine.

use tracing::debug;
use worklane_fields::{FieldDef, FieldsError, ValidationEngine};

use crate::gateway::{CommitGateway, FieldIdentity, GatewayError};
use crate::policy::{CommitPolicy, EditDecision, EditorInput};

/// Fallback shown when a gateway failure carries no message.
const GENERIC_SAVE_ERROR: &str = "the change could not be saved";

/// Mode of an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Displaying the committed value
    Viewing,
    /// Staging local changes
    Editing,
    /// A commit is in flight; the staged value is frozen
    Saving,
}

/// A commit the session wants issued against the gateway.
///
/// The ticket identifies this particular commit; [`EditSession::resolve`]
/// discards resolutions whose ticket is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub field: FieldIdentity,
    pub value: String,
    pub ticket: u64,
}

/// Outcome of a [`EditSession::drive`] step that issued a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The gateway accepted the value; propagate it to parent state
    Saved(String),
    /// The gateway rejected the value; the session is editable again
    Failed(String),
}

/// One inline-editable field: committed value, staged value, mode, error.
///
/// Sessions are independent — each field on a record owns its own machine,
/// and one field's in-flight commit never blocks another's.
pub struct EditSession {
    identity: FieldIdentity,
    def: FieldDef,
    committed: String,
    staged: String,
    mode: EditMode,
    error: Option<String>,
    validator: ValidationEngine,
    seq: u64,
    pending: Option<u64>,
}

impl EditSession {
    /// Create a session over a field definition and its current value.
    pub fn new(identity: FieldIdentity, def: FieldDef, committed: impl Into<String>) -> Self {
        let committed = committed.into();
        Self {
            identity,
            def,
            staged: committed.clone(),
            committed,
            mode: EditMode::Viewing,
            error: None,
            validator: ValidationEngine::default(),
            seq: 0,
            pending: None,
        }
    }

    /// Replace the default validator (e.g. to wire a real member lookup).
    pub fn with_validator(mut self, validator: ValidationEngine) -> Self {
        self.validator = validator;
        self
    }

    /// The field this session edits.
    pub fn identity(&self) -> &FieldIdentity {
        &self.identity
    }

    /// Current mode.
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// The last successfully committed value.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// The staged (local, unpersisted) value.
    pub fn staged(&self) -> &str {
        &self.staged
    }

    /// The error surfaced next to the field, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the staged value differs from the committed one.
    pub fn is_dirty(&self) -> bool {
        self.staged != self.committed
    }

    /// Apply a user input. Pure transition: at most returns a commit for
    /// the caller to issue against the gateway and feed back via
    /// [`resolve`](Self::resolve).
    pub fn apply(&mut self, input: EditorInput) -> Option<CommitRequest> {
        match self.mode {
            EditMode::Saving => {
                // Single in-flight commit: everything is dropped, not queued.
                debug!(field = %self.identity.field, ?input, "input ignored while saving");
                None
            }
            EditMode::Viewing => {
                if input == EditorInput::Activate {
                    self.staged = self.committed.clone();
                    self.error = None;
                    self.mode = EditMode::Editing;
                }
                None
            }
            EditMode::Editing => {
                match CommitPolicy::decide(&self.def.kind, &input, self.is_dirty()) {
                    EditDecision::Stage(value) => {
                        self.staged = value;
                        None
                    }
                    EditDecision::LineBreak => {
                        self.staged.push('\n');
                        None
                    }
                    EditDecision::StageAndCommit(value) => {
                        self.staged = value;
                        if !self.is_dirty() {
                            // Re-picking the committed value is a pure cancel.
                            self.cancel();
                            return None;
                        }
                        self.begin_commit()
                    }
                    EditDecision::Commit => self.begin_commit(),
                    EditDecision::Cancel => {
                        self.cancel();
                        None
                    }
                    EditDecision::Ignore => None,
                }
            }
        }
    }

    /// Complete a commit previously issued by [`apply`](Self::apply).
    ///
    /// Resolutions carrying a stale ticket are discarded without touching
    /// session state, so a late gateway response can never clobber a newer
    /// edit.
    pub fn resolve(&mut self, ticket: u64, result: Result<(), GatewayError>) {
        if self.pending != Some(ticket) {
            debug!(
                field = %self.identity.field,
                ticket,
                "discarding stale commit resolution"
            );
            return;
        }
        self.pending = None;

        match result {
            Ok(()) => {
                self.committed = self.staged.clone();
                self.mode = EditMode::Viewing;
                self.error = None;
            }
            Err(err) => {
                // Staged value retained so the user can retry or cancel.
                self.mode = EditMode::Editing;
                self.error = Some(if err.message.is_empty() {
                    GENERIC_SAVE_ERROR.to_string()
                } else {
                    err.message
                });
            }
        }
    }

    /// Apply an input and, when it triggers a commit, run it to completion
    /// against the gateway.
    ///
    /// Returns `None` when no commit was issued. The gateway call resolves
    /// before the session leaves `Saving`; [`CommitOutcome::Saved`] carries
    /// the value for parent-state propagation.
    pub async fn drive<G>(&mut self, input: EditorInput, gateway: &G) -> Option<CommitOutcome>
    where
        G: CommitGateway + ?Sized,
    {
        let request = self.apply(input)?;
        let result = gateway.commit(&request.field, &request.value).await;
        self.resolve(request.ticket, result);

        Some(match self.error {
            None => CommitOutcome::Saved(self.committed.clone()),
            Some(ref message) => CommitOutcome::Failed(message.clone()),
        })
    }

    /// Validate the staged value and enter `Saving`. A validation error
    /// keeps the session editable and never reaches the gateway.
    fn begin_commit(&mut self) -> Option<CommitRequest> {
        if let Err(err) = self.validator.validate(&self.def, &self.staged) {
            self.error = Some(match err {
                FieldsError::ValidationFailed { message, .. } => message,
                other => other.to_string(),
            });
            return None;
        }

        self.seq += 1;
        self.pending = Some(self.seq);
        self.mode = EditMode::Saving;
        self.error = None;

        Some(CommitRequest {
            field: self.identity.clone(),
            value: self.staged.clone(),
            ticket: self.seq,
        })
    }

    fn cancel(&mut self) {
        self.staged = self.committed.clone();
        self.error = None;
        self.mode = EditMode::Viewing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use worklane_fields::{FieldKind, SelectOption};

    struct MockGateway {
        calls: Mutex<Vec<(FieldIdentity, String)>>,
        fail_with: Option<String>,
    }

    impl MockGateway {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(message.to_string()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CommitGateway for MockGateway {
        async fn commit(&self, field: &FieldIdentity, value: &str) -> Result<(), GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push((field.clone(), value.to_string()));
            match &self.fail_with {
                None => Ok(()),
                Some(message) => Err(GatewayError::new(message.clone())),
            }
        }
    }

    fn text_session(committed: &str) -> EditSession {
        EditSession::new(
            FieldIdentity::new("task-1", "title"),
            FieldDef::new("title", FieldKind::PlainText),
            committed,
        )
    }

    fn select_session(committed: &str) -> EditSession {
        EditSession::new(
            FieldIdentity::new("task-1", "status"),
            FieldDef::new(
                "status",
                FieldKind::SingleSelect {
                    options: vec![
                        SelectOption::new("todo", 0),
                        SelectOption::new("doing", 1),
                        SelectOption::new("done", 2),
                    ],
                },
            ),
            committed,
        )
    }

    #[test]
    fn activate_stages_committed_and_clears_error() {
        let mut session = text_session("Alpha");
        session.error = Some("old error".into());
        session.apply(EditorInput::Activate);

        assert_eq!(session.mode(), EditMode::Editing);
        assert_eq!(session.staged(), "Alpha");
        assert!(session.error().is_none());
    }

    #[test]
    fn inputs_before_activation_are_ignored() {
        let mut session = text_session("Alpha");
        assert!(session.apply(EditorInput::Input("Beta".into())).is_none());
        assert_eq!(session.mode(), EditMode::Viewing);
        assert_eq!(session.staged(), "Alpha");
    }

    #[tokio::test]
    async fn text_confirm_commits_once_with_staged_value() {
        let gateway = MockGateway::ok();
        let mut session = text_session("Alpha");

        session.apply(EditorInput::Activate);
        session.apply(EditorInput::Input("Beta".into()));
        let outcome = session
            .drive(
                EditorInput::Confirm {
                    with_modifier: false,
                },
                &gateway,
            )
            .await;

        assert_eq!(outcome, Some(CommitOutcome::Saved("Beta".into())));
        assert_eq!(gateway.call_count(), 1);
        assert_eq!(gateway.calls.lock().unwrap()[0].1, "Beta");
        assert_eq!(session.mode(), EditMode::Viewing);
        assert_eq!(session.committed(), "Beta");
    }

    #[tokio::test]
    async fn text_blur_unchanged_never_calls_gateway() {
        let gateway = MockGateway::ok();
        let mut session = text_session("Alpha");

        session.apply(EditorInput::Activate);
        let outcome = session.drive(EditorInput::Blur, &gateway).await;

        assert!(outcome.is_none());
        assert_eq!(gateway.call_count(), 0);
        assert_eq!(session.mode(), EditMode::Viewing);
        assert_eq!(session.committed(), "Alpha");
    }

    #[tokio::test]
    async fn text_blur_dirty_commits() {
        let gateway = MockGateway::ok();
        let mut session = text_session("Alpha");

        session.apply(EditorInput::Activate);
        session.apply(EditorInput::Input("Beta".into()));
        session.drive(EditorInput::Blur, &gateway).await;

        assert_eq!(gateway.call_count(), 1);
        assert_eq!(session.committed(), "Beta");
    }

    #[tokio::test]
    async fn select_commits_immediately_exactly_once() {
        let gateway = MockGateway::ok();
        let mut session = select_session("todo");

        session.apply(EditorInput::Activate);
        let outcome = session
            .drive(EditorInput::Select("done".into()), &gateway)
            .await;

        assert_eq!(outcome, Some(CommitOutcome::Saved("done".into())));
        assert_eq!(gateway.call_count(), 1);
        assert_eq!(gateway.calls.lock().unwrap()[0].1, "done");
        assert_eq!(session.mode(), EditMode::Viewing);
    }

    #[test]
    fn select_same_value_is_pure_cancel() {
        let mut session = select_session("todo");
        session.apply(EditorInput::Activate);
        let request = session.apply(EditorInput::Select("todo".into()));

        assert!(request.is_none());
        assert_eq!(session.mode(), EditMode::Viewing);
        assert_eq!(session.committed(), "todo");
    }

    #[test]
    fn second_trigger_while_saving_is_no_op() {
        let mut session = text_session("Alpha");
        session.apply(EditorInput::Activate);
        session.apply(EditorInput::Input("Beta".into()));

        let first = session.apply(EditorInput::Confirm {
            with_modifier: false,
        });
        assert!(first.is_some());
        assert_eq!(session.mode(), EditMode::Saving);

        // Second trigger (and any other input) is dropped, not queued
        let second = session.apply(EditorInput::Confirm {
            with_modifier: false,
        });
        assert!(second.is_none());
        assert!(session.apply(EditorInput::Input("Gamma".into())).is_none());
        assert_eq!(session.staged(), "Beta");

        // Escape while saving is ignored too
        session.apply(EditorInput::Escape);
        assert_eq!(session.mode(), EditMode::Saving);

        session.resolve(first.unwrap().ticket, Ok(()));
        assert_eq!(session.mode(), EditMode::Viewing);
        assert_eq!(session.committed(), "Beta");
    }

    #[tokio::test]
    async fn failure_returns_to_editing_with_staged_and_error() {
        let gateway = MockGateway::failing("row was deleted");
        let mut session = text_session("Alpha");

        session.apply(EditorInput::Activate);
        session.apply(EditorInput::Input("Beta".into()));
        let outcome = session
            .drive(
                EditorInput::Confirm {
                    with_modifier: false,
                },
                &gateway,
            )
            .await;

        assert_eq!(outcome, Some(CommitOutcome::Failed("row was deleted".into())));
        assert_eq!(session.mode(), EditMode::Editing);
        assert_eq!(session.staged(), "Beta");
        assert_eq!(session.committed(), "Alpha");
        assert_eq!(session.error(), Some("row was deleted"));
    }

    #[tokio::test]
    async fn empty_failure_message_falls_back_to_generic() {
        let gateway = MockGateway::failing("");
        let mut session = text_session("Alpha");

        session.apply(EditorInput::Activate);
        session.apply(EditorInput::Input("Beta".into()));
        session
            .drive(
                EditorInput::Confirm {
                    with_modifier: false,
                },
                &gateway,
            )
            .await;

        assert_eq!(session.error(), Some(GENERIC_SAVE_ERROR));
    }

    #[tokio::test]
    async fn retry_after_failure_reaches_gateway_again() {
        let gateway = MockGateway::failing("busy");
        let mut session = text_session("Alpha");

        session.apply(EditorInput::Activate);
        session.apply(EditorInput::Input("Beta".into()));
        session
            .drive(
                EditorInput::Confirm {
                    with_modifier: false,
                },
                &gateway,
            )
            .await;
        session
            .drive(
                EditorInput::Confirm {
                    with_modifier: false,
                },
                &gateway,
            )
            .await;

        assert_eq!(gateway.call_count(), 2);
    }

    #[test]
    fn validation_error_blocks_saving_and_gateway() {
        let mut session = EditSession::new(
            FieldIdentity::new("task-1", "due"),
            FieldDef::new("due", FieldKind::Date),
            "",
        );

        session.apply(EditorInput::Activate);
        let request = session.apply(EditorInput::Select("not-a-date".into()));

        assert!(request.is_none());
        assert_eq!(session.mode(), EditMode::Editing);
        assert!(session.error().unwrap().contains("not-a-date"));
    }

    #[test]
    fn escape_discards_staged_value() {
        let mut session = text_session("Alpha");
        session.apply(EditorInput::Activate);
        session.apply(EditorInput::Input("Beta".into()));
        session.apply(EditorInput::Escape);

        assert_eq!(session.mode(), EditMode::Viewing);
        assert_eq!(session.committed(), "Alpha");
        assert!(!session.is_dirty());
    }

    #[test]
    fn multi_line_modifier_appends_line_break_without_commit() {
        let mut session = EditSession::new(
            FieldIdentity::new("task-1", "description"),
            FieldDef::new("description", FieldKind::MultiLineText),
            "line one",
        );

        session.apply(EditorInput::Activate);
        let request = session.apply(EditorInput::Confirm {
            with_modifier: true,
        });

        assert!(request.is_none());
        assert_eq!(session.mode(), EditMode::Editing);
        assert_eq!(session.staged(), "line one\n");
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let mut session = text_session("Alpha");
        session.apply(EditorInput::Activate);
        session.apply(EditorInput::Input("Beta".into()));

        let first = session
            .apply(EditorInput::Confirm {
                with_modifier: false,
            })
            .unwrap();
        session.resolve(first.ticket, Err(GatewayError::new("timeout")));
        assert_eq!(session.mode(), EditMode::Editing);

        // Re-trigger, producing a newer ticket
        let second = session
            .apply(EditorInput::Confirm {
                with_modifier: false,
            })
            .unwrap();
        assert!(second.ticket > first.ticket);

        // A late duplicate of the first resolution must not touch state
        session.resolve(first.ticket, Ok(()));
        assert_eq!(session.mode(), EditMode::Saving);
        assert_eq!(session.committed(), "Alpha");

        session.resolve(second.ticket, Ok(()));
        assert_eq!(session.mode(), EditMode::Viewing);
        assert_eq!(session.committed(), "Beta");
    }

    #[test]
    fn sessions_are_independent() {
        let mut title = text_session("Alpha");
        let mut status = select_session("todo");

        title.apply(EditorInput::Activate);
        title.apply(EditorInput::Input("Beta".into()));
        let pending = title.apply(EditorInput::Confirm {
            with_modifier: false,
        });
        assert!(pending.is_some());
        assert_eq!(title.mode(), EditMode::Saving);

        // The other field's machine is unaffected by the in-flight commit
        status.apply(EditorInput::Activate);
        assert_eq!(status.mode(), EditMode::Editing);
        let request = status.apply(EditorInput::Select("done".into()));
        assert!(request.is_some());
    }
}
