//! Coercion of parsed value trees into typed records.

pub mod context;
mod compound;
pub(crate) mod duration;
pub mod error;
mod record;
mod scalar;

pub use context::BindContext;
pub use error::{BindError, BindErrorKind, BindReport, Recorded};
pub use record::{RecordCursor, coerce_record};

use confit_value::{Node, Table};

use crate::SchemaError;
use crate::registry::Registry;
use crate::schema::{RecordSchema, Shape};

/// A type that one node of a value tree can be coerced into.
pub trait Bind: Sized {
    /// The shape this type accepts. Drives schema construction, the
    /// cycle check, and template rendering.
    fn shape() -> Shape;

    /// Coerces `node` into `Self`, recording diagnostics on `cx`.
    ///
    /// An `Err` means the diagnostic has already been pushed; callers
    /// keep walking siblings so one run surfaces every problem.
    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded>;
}

/// A struct assembled from the keys of a table.
///
/// Implemented by `#[derive(Bind)]`, which also supplies the [`Bind`]
/// impl in terms of [`coerce_record`].
pub trait Record: Bind + 'static {
    /// The resolved field layout, memoized process-wide.
    fn schema() -> Result<&'static RecordSchema, SchemaError>;

    /// Pulls this record's fields out of the cursor.
    fn assemble(rec: &mut RecordCursor<'_>) -> Result<Self, Recorded>;
}

/// Binds a whole table as the record `T`, reporting every error found.
pub fn bind_root<T: Record>(table: &Table, registry: &Registry) -> Result<T, BindReport> {
    let cx = BindContext::new(registry);
    let value = coerce_record::<T>(table, &cx);
    match (cx.finish(), value) {
        (Ok(()), Ok(value)) => Ok(value),
        (Err(report), _) => Err(report),
        (Ok(()), Err(Recorded)) => {
            // Every Err(Recorded) is preceded by a fail() call.
            unreachable!("coercion failed without recording a diagnostic")
        }
    }
}

/// Binds a whole parsed document as the record `T`.
///
/// The document root must be a table; anything else is reported as a
/// single root-level type mismatch.
pub fn bind_value<T: Record>(node: &Node, registry: &Registry) -> Result<T, BindReport> {
    match node {
        Node::Table(table) => bind_root::<T>(table, registry),
        other => {
            let cx = BindContext::new(registry);
            cx.mismatch("table", other);
            let Err(report) = cx.finish() else {
                unreachable!("a mismatch was just recorded")
            };
            Err(report)
        }
    }
}
