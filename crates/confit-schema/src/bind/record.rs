//! Assembling records by popping keys off a working table.

use confit_value::{Node, Table};

use crate::bind::context::BindContext;
use crate::bind::duration;
use crate::bind::error::{BindErrorKind, Recorded};
use crate::bind::{Bind, Record};

/// Coerces `table` into the record `T`.
///
/// The schema is resolved first so that declaration mistakes (duplicate
/// keys, suffix overlaps) surface even when the caller skipped binder
/// construction.
pub fn coerce_record<T: Record>(table: &Table, cx: &BindContext<'_>) -> Result<T, Recorded> {
    let schema = match T::schema() {
        Ok(schema) => schema,
        Err(error) => {
            return Err(cx.fail(BindErrorKind::InvalidValue {
                reason: error.to_string(),
            }));
        }
    };
    log::trace!("assembling record `{}`", schema.name());
    let mut rec = RecordCursor {
        // Working copy; fields pop their keys as they consume them.
        table: table.clone(),
        cx,
    };
    T::assemble(&mut rec)
}

/// One record's working table. Field accessors remove the keys they
/// consume; whatever remains at [`finish`](RecordCursor::finish) is
/// unknown.
pub struct RecordCursor<'a> {
    table: Table,
    cx: &'a BindContext<'a>,
}

impl RecordCursor<'_> {
    /// A field that must be present. The error is recorded at the
    /// field's own path, so a missing `token` inside `webhooks[0]`
    /// reads `webhooks[0].token`.
    pub fn required<T: Bind>(&mut self, key: &str) -> Result<T, Recorded> {
        match self.take(key) {
            Some(value) => value,
            None => {
                self.cx.push_key(key);
                let recorded = self.cx.fail(BindErrorKind::MissingField {
                    key: key.to_owned(),
                });
                self.cx.pop();
                Err(recorded)
            }
        }
    }

    /// A field that resolves to `None` when absent.
    pub fn optional<T: Bind>(&mut self, key: &str) -> Result<Option<T>, Recorded> {
        match self.take(key) {
            Some(value) => value.map(Some),
            None => Ok(None),
        }
    }

    /// A field that falls back to `fallback()` when absent.
    pub fn defaulted<T: Bind>(
        &mut self,
        key: &str,
        fallback: impl FnOnce() -> T,
    ) -> Result<T, Recorded> {
        match self.take(key) {
            Some(value) => value,
            None => Ok(fallback()),
        }
    }

    /// Pops `key` (and, for duration fields, its suffixed siblings) and
    /// coerces whatever was found. `None` means the field is absent.
    fn take<T: Bind>(&mut self, key: &str) -> Option<Result<T, Recorded>> {
        let bare = self.table.remove(key);

        if T::shape().is_duration() {
            let mut parts = Vec::new();
            for (unit, scale) in duration::UNITS {
                let suffixed = format!("{key}-{unit}");
                if let Some(node) = self.table.remove(&suffixed) {
                    parts.push((suffixed, scale, node));
                }
            }
            if !parts.is_empty() {
                if bare.is_some() {
                    self.cx.push_key(key);
                    let recorded = self.cx.fail(BindErrorKind::InvalidValue {
                        reason: format!(
                            "`{key}` is given both as a literal and as suffixed keys"
                        ),
                    });
                    self.cx.pop();
                    return Some(Err(recorded));
                }
                let composed = match duration::compose(&parts, self.cx) {
                    Ok(total) => Node::from(total),
                    Err(recorded) => return Some(Err(recorded)),
                };
                self.cx.push_key(key);
                let value = T::coerce(&composed, self.cx);
                self.cx.pop();
                return Some(value);
            }
        }

        let node = bare?;
        self.cx.push_key(key);
        let value = T::coerce(&node, self.cx);
        self.cx.pop();
        Some(value)
    }

    /// Flags every key still in the table as unknown, each at its own
    /// path.
    pub fn finish(&mut self) -> Result<(), Recorded> {
        if self.table.is_empty() {
            return Ok(());
        }
        for (key, _) in self.table.iter() {
            self.cx.push_key(key);
            self.cx.fail(BindErrorKind::UnknownKey { key: key.to_owned() });
            self.cx.pop();
        }
        Err(Recorded)
    }
}
