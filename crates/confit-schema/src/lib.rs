//! Schema-directed configuration binding.
//!
//! A record type declares its fields once. This crate resolves that
//! declaration into a [`RecordSchema`], coerces parsed value trees onto
//! the type while collecting every error, and renders annotated
//! document templates from the same schema.

pub mod bind;
mod error;

/// Named runtime objects for reference fields.
pub mod registry;

/// Process-wide schema memoization and the record cycle check.
pub mod resolve;

pub mod schema;

/// Annotated document rendering.
pub mod template;

pub use bind::{
    Bind, BindContext, BindError, BindErrorKind, BindReport, Record, RecordCursor, Recorded,
    bind_root, bind_value, coerce_record,
};
pub use error::SchemaError;
pub use registry::{Extern, Registry};
pub use resolve::{resolve, verify_acyclic};
pub use schema::{FieldDefault, FieldSpec, RecordHandle, RecordSchema, Shape};
pub use template::{render_instance, render_template};
