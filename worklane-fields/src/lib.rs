//! Field definitions and validation
//!
//! `worklane-fields` is a standalone, schema-only crate that manages field
//! definitions for editable record attributes. It knows nothing about tasks,
//! boards, or storage layout — consumers provide their own built-in
//! definitions via `with_defaults()` and their own member lookup for
//! reference validation.
//!
//! # Architecture
//!
//! - **Schema-only**: Owns field definitions, not field values
//! - **YAML on disk**: One `.yaml` file per field definition
//! - **Consumer-agnostic**: Takes a `Path`, consumers decide where it lives
//! - **Default seeding**: `with_defaults()` writes defaults that don't exist,
//!   preserves customizations

pub mod context;
pub mod error;
pub mod types;
pub mod validation;

pub use context::{FieldDefaults, FieldsContext, FieldsContextBuilder};
pub use error::{FieldsError, Result};
pub use types::{FieldDef, FieldKind, SelectOption};
pub use validation::{AllowAllMembers, MemberLookup, ValidationEngine};
