//! The generic value tree consumed and produced by confit.
//!
//! A [`Node`] is what a configuration parser hands to the binding engine:
//! an immutable tree of scalars, sequences, and insertion-ordered tables.
//! [`KeyPath`] locates a node from the bind root for diagnostics, and
//! [`ToNode`] is the emission direction used for defaults and templates.

mod emit;
mod path;
mod value;

pub use emit::ToNode;
pub use path::{KeyPath, PathSegment};
pub use value::{Node, Scalar, ScalarKind, Table};

pub use toml_datetime::{Date, Datetime, Time};
