use std::any::TypeId;
use std::fmt;

use ahash::AHashSet;
use confit_value::{Node, ScalarKind};

use crate::SchemaError;
use crate::bind::duration;

/// Structural category of a field's declared type.
///
/// The set is closed: the coercer dispatches over these variants with an
/// exhaustive match instead of inspecting live types.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Scalar(ScalarKind),
    Optional(Box<Shape>),
    List(Box<Shape>),
    Tuple(Vec<Shape>),
    Map(Box<Shape>),
    Record(RecordHandle),
    /// A registered value selected by qualified name.
    Reference { expects: &'static str },
    /// A string-selected unit variant.
    Choice {
        name: &'static str,
        variants: &'static [&'static str],
    },
    /// A time span: a direct literal, or suffixed sibling keys summed up.
    Duration,
}

impl Shape {
    /// The shape behind any `Optional` wrapper.
    pub fn unwrap_optional(&self) -> &Shape {
        match self {
            Shape::Optional(inner) => inner.unwrap_optional(),
            other => other,
        }
    }

    pub(crate) fn is_duration(&self) -> bool {
        matches!(self.unwrap_optional(), Shape::Duration)
    }
}

/// Lazy handle to a nested record's schema.
///
/// Holding a resolve function instead of the schema itself keeps schema
/// construction non-recursive; cycle checking walks handles afterwards.
#[derive(Clone, Copy)]
pub struct RecordHandle {
    name: &'static str,
    id: TypeId,
    resolve: fn() -> Result<&'static RecordSchema, SchemaError>,
}

impl RecordHandle {
    pub fn new(
        name: &'static str,
        id: TypeId,
        resolve: fn() -> Result<&'static RecordSchema, SchemaError>,
    ) -> Self {
        RecordHandle { name, id, resolve }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn schema(&self) -> Result<&'static RecordSchema, SchemaError> {
        (self.resolve)()
    }
}

impl fmt::Debug for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordHandle({})", self.name)
    }
}

impl PartialEq for RecordHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// How a field behaves when its key is absent.
pub enum FieldDefault {
    /// The key must be present.
    Required,
    /// Absence yields `None`.
    OptionalNone,
    /// Absence yields the factory value; the closure renders that value
    /// for templates. The typed factory itself lives in the generated
    /// assembly and runs fresh on every bind.
    Value(Box<dyn Fn() -> Node + Send + Sync>),
}

impl FieldDefault {
    pub fn is_required(&self) -> bool {
        matches!(self, FieldDefault::Required)
    }

    /// The default rendered as a node, when one exists.
    pub fn render(&self) -> Option<Node> {
        match self {
            FieldDefault::Value(f) => Some(f()),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Required => f.write_str("Required"),
            FieldDefault::OptionalNone => f.write_str("OptionalNone"),
            FieldDefault::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// One bindable field of a record.
#[derive(Debug)]
pub struct FieldSpec {
    /// External key, in the document's spelling (kebab-case by default).
    pub key: &'static str,
    pub shape: Shape,
    pub default: FieldDefault,
    /// Doc comment lines rendered above the field in templates.
    pub doc: &'static [&'static str],
}

impl FieldSpec {
    pub fn required(key: &'static str, shape: Shape) -> Self {
        FieldSpec {
            key,
            shape,
            default: FieldDefault::Required,
            doc: &[],
        }
    }

    pub fn optional(key: &'static str, shape: Shape) -> Self {
        FieldSpec {
            key,
            shape,
            default: FieldDefault::OptionalNone,
            doc: &[],
        }
    }

    pub fn defaulted(
        key: &'static str,
        shape: Shape,
        render: impl Fn() -> Node + Send + Sync + 'static,
    ) -> Self {
        FieldSpec {
            key,
            shape,
            default: FieldDefault::Value(Box::new(render)),
            doc: &[],
        }
    }

    pub fn with_doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }
}

/// The compiled, ordered description of a record's bindable fields.
///
/// Built once per record type and memoized; resolving the same type
/// twice hands back the same `&'static` schema.
#[derive(Debug)]
pub struct RecordSchema {
    name: &'static str,
    doc: &'static [&'static str],
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    /// Builds a schema, rejecting duplicate external keys and duration
    /// suffix keys that collide with declared fields.
    pub fn new(
        name: &'static str,
        doc: &'static [&'static str],
        fields: Vec<FieldSpec>,
    ) -> Result<Self, SchemaError> {
        let mut seen = AHashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.key) {
                return Err(SchemaError::DuplicateKey {
                    record: name,
                    key: field.key,
                });
            }
        }
        for field in fields.iter().filter(|f| f.shape.is_duration()) {
            for (unit, _) in duration::UNITS {
                let suffixed = format!("{}-{}", field.key, unit);
                if fields.iter().any(|other| other.key == suffixed) {
                    return Err(SchemaError::SuffixOverlap {
                        record: name,
                        field: field.key,
                        collides: suffixed,
                    });
                }
            }
        }
        Ok(RecordSchema { name, doc, fields })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn doc(&self) -> &'static [&'static str] {
        self.doc
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_keys() {
        let err = RecordSchema::new(
            "Sample",
            &[],
            vec![
                FieldSpec::required("name", Shape::Scalar(ScalarKind::String)),
                FieldSpec::required("name", Shape::Scalar(ScalarKind::Integer)),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateKey {
                record: "Sample",
                key: "name",
            }
        );
    }

    #[test]
    fn rejects_duration_suffix_collisions() {
        let err = RecordSchema::new(
            "Sample",
            &[],
            vec![
                FieldSpec::required("delete-after", Shape::Duration),
                FieldSpec::required("delete-after-days", Shape::Scalar(ScalarKind::Integer)),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::SuffixOverlap {
                record: "Sample",
                field: "delete-after",
                collides: "delete-after-days".to_string(),
            }
        );
    }

    #[test]
    fn optional_duration_still_guards_suffixes() {
        let err = RecordSchema::new(
            "Sample",
            &[],
            vec![
                FieldSpec::optional("ttl", Shape::Optional(Box::new(Shape::Duration))),
                FieldSpec::required("ttl-hours", Shape::Scalar(ScalarKind::Integer)),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::SuffixOverlap { .. }));
    }

    #[test]
    fn looks_up_fields_by_key() {
        let schema = RecordSchema::new(
            "Sample",
            &[],
            vec![
                FieldSpec::required("host", Shape::Scalar(ScalarKind::String)),
                FieldSpec::optional("port", Shape::Scalar(ScalarKind::Integer)),
            ],
        )
        .unwrap();
        assert!(schema.field("host").is_some());
        assert!(schema.field("missing").is_none());
        assert_eq!(schema.fields().len(), 2);
    }
}
