//! The persistence gateway boundary.
//!
//! The editor core never talks to storage directly; it hands staged values
//! to a [`CommitGateway`] and reacts to the outcome. The gateway is opaque
//! beyond this contract — no retry, no timeout, no cancellation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity of the field a commit targets: the owning record plus the
/// field name within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIdentity {
    /// ID of the record (e.g. a task) the field belongs to
    pub record: String,
    /// Field name within the record (e.g. "title", "status")
    pub field: String,
}

impl FieldIdentity {
    /// Create a field identity
    pub fn new(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            field: field.into(),
        }
    }
}

/// A failed commit, carrying the message surfaced to the user.
///
/// An empty message is replaced by a generic one at the session boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    /// Create a gateway error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Persists a staged field value.
///
/// Exactly one operation: commit the new value for the identified field.
/// Failures are surfaced verbatim to the editing user; the core never
/// retries on its own.
#[async_trait]
pub trait CommitGateway: Send + Sync {
    /// Persist `value` for `field`, resolving when storage has accepted
    /// or rejected it.
    async fn commit(&self, field: &FieldIdentity, value: &str) -> Result<(), GatewayError>;
}
