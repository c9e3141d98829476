//! Schema-directed configuration binding.
//!
//! Derive [`Bind`] on a record type, then let a [`Binder`] parse a
//! document and either return a fully populated value or a
//! [`BindReport`] naming every problem at its path in one pass. The
//! same schema renders a commented starter document via
//! [`Binder::template`].

mod binder;
mod error;

pub use binder::Binder;
pub use error::Error;

pub use confit_macros::Bind;
pub use confit_schema::{
    Bind, BindContext, BindError, BindErrorKind, BindReport, Extern, FieldDefault, FieldSpec,
    Record, RecordCursor, RecordHandle, RecordSchema, Recorded, Registry, SchemaError, Shape,
    bind_root, bind_value, coerce_record, render_instance, render_template, resolve,
    verify_acyclic,
};
pub use confit_toml::{ParseError, parse};
pub use confit_value::{
    Date, Datetime, KeyPath, Node, PathSegment, Scalar, ScalarKind, Table, Time, ToNode,
};

/// One-shot parse and bind against an empty registry.
pub fn from_str<T: Record>(source: &str) -> Result<T, Error> {
    Binder::<T>::new()?.parse(source)
}
