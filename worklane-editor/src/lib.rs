//! Inline field-editing commit protocol
//!
//! This crate owns the state machine behind inline-editable record fields:
//! a field is displayed (`Viewing`), the user activates it (`Editing`),
//! changes are staged locally, and a kind-dependent commit trigger sends the
//! staged value through a persistence gateway (`Saving`). Success returns to
//! `Viewing` with the committed value updated; failure returns to `Editing`
//! with the staged value retained and the error surfaced.
//!
//! The machine is sans-IO: [`EditSession::apply`] is a pure transition that
//! at most hands back a [`CommitRequest`], and [`EditSession::resolve`]
//! completes it. [`EditSession::drive`] is the async convenience that wires
//! both to a [`CommitGateway`].
//!
//! ## Commit policy
//!
//! - Plain and multi-line text commit on the confirm key (without the
//!   line-break modifier) or on focus loss, and only when the staged value
//!   actually differs — blurring an unchanged field is a pure cancel.
//! - Select, date, and user-reference fields commit immediately on selection
//!   change; there is no separate confirm step.
//! - Escape always returns to viewing and discards the staged value, except
//!   while a save is in flight (ignored until it resolves).
//!
//! At most one commit is in flight per session; triggers arriving while
//! `Saving` are dropped, not queued. Each resolution carries a ticket and
//! stale tickets are discarded, so a late gateway response can never clobber
//! a newer edit.

mod gateway;
mod policy;
mod session;

pub use gateway::{CommitGateway, FieldIdentity, GatewayError};
pub use policy::{CommitPolicy, EditDecision, EditorInput};
pub use session::{CommitOutcome, CommitRequest, EditMode, EditSession};
