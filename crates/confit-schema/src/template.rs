//! Rendering a schema as an annotated, ready-to-edit document.
//!
//! The output is valid TOML. Mandatory fields are live with placeholder
//! values, defaulted and optional fields are commented out, and nested
//! records become `[table]` / `[[array-of-tables]]` stanzas. Rendering
//! an instance keeps the same skeleton but writes the instance's values
//! live wherever they are set.

use confit_value::{Node, Scalar, ScalarKind, Table};

use crate::SchemaError;
use crate::bind::duration::format_duration;
use crate::schema::{FieldSpec, RecordHandle, RecordSchema, Shape};

/// Where field values come from.
#[derive(Clone, Copy)]
enum Source<'a> {
    Placeholders,
    Instance(&'a Table),
}

impl<'a> Source<'a> {
    fn lookup(&self, key: &str) -> Option<&'a Node> {
        match self {
            Source::Placeholders => None,
            Source::Instance(table) => table.get(key),
        }
    }
}

/// Renders `schema` with placeholder values.
pub fn render_template(schema: &'static RecordSchema) -> Result<String, SchemaError> {
    render(schema, Source::Placeholders)
}

/// Renders `schema` with `instance`'s values filled in live.
pub fn render_instance(
    schema: &'static RecordSchema,
    instance: &Table,
) -> Result<String, SchemaError> {
    render(schema, Source::Instance(instance))
}

fn render(schema: &'static RecordSchema, source: Source<'_>) -> Result<String, SchemaError> {
    let mut renderer = Renderer {
        stack: vec![schema as *const RecordSchema],
        blocks: Vec::new(),
    };
    if !schema.doc().is_empty() {
        renderer.blocks.push(comment_lines(schema.doc()));
    }
    // Inline fields must precede any stanza: a `key = value` line after
    // a `[header]` would land inside that header's table.
    for field in schema.fields() {
        if renders_inline(field, source) {
            let block = field_block(field, source, false);
            renderer.blocks.push(block);
        }
    }
    for field in schema.fields() {
        if renders_inline(field, source) {
            continue;
        }
        if let Some((kind, handle)) = stanza_kind(&field.shape) {
            renderer.stanza(field, kind, handle, source, &[], false)?;
        }
    }
    let mut out = renderer.blocks.join("\n\n");
    out.push('\n');
    Ok(out)
}

enum StanzaKind {
    Table,
    ArrayOfTables,
}

/// Record-shaped fields render as stanzas; everything else is inline.
fn stanza_kind(shape: &Shape) -> Option<(StanzaKind, RecordHandle)> {
    match shape {
        Shape::Record(handle) => Some((StanzaKind::Table, *handle)),
        Shape::List(inner) => match inner.as_ref() {
            Shape::Record(handle) => Some((StanzaKind::ArrayOfTables, *handle)),
            _ => None,
        },
        Shape::Optional(inner) => stanza_kind(inner),
        _ => None,
    }
}

/// Whether the field renders as a `key = value` line. An instance value
/// that is an empty sequence renders inline as `key = []`; a sample
/// stanza would bind back to a one-element list.
fn renders_inline(field: &FieldSpec, source: Source<'_>) -> bool {
    match stanza_kind(&field.shape) {
        None => true,
        Some((StanzaKind::ArrayOfTables, _)) => {
            matches!(source.lookup(field.key), Some(Node::Sequence(items)) if items.is_empty())
        }
        Some((StanzaKind::Table, _)) => false,
    }
}

struct Renderer {
    /// Schemas currently being rendered, for pruning legal recursion.
    stack: Vec<*const RecordSchema>,
    blocks: Vec<String>,
}

impl Renderer {
    fn stanza(
        &mut self,
        field: &FieldSpec,
        kind: StanzaKind,
        handle: RecordHandle,
        source: Source<'_>,
        prefix: &[&'static str],
        muted: bool,
    ) -> Result<(), SchemaError> {
        let child_schema = handle.schema()?;
        if self
            .stack
            .iter()
            .any(|&seen| std::ptr::eq(seen, child_schema))
        {
            // Recursive type; the enclosing stanza already shows it.
            return Ok(());
        }

        let mut path: Vec<&'static str> = prefix.to_vec();
        path.push(field.key);
        let live = !muted
            && (field.default.is_required()
                || overrides(&field.default.render(), source.lookup(field.key)));

        self.stack.push(child_schema);
        match kind {
            StanzaKind::Table => {
                let child_source = match source.lookup(field.key) {
                    Some(Node::Table(table)) => Source::Instance(table),
                    _ => Source::Placeholders,
                };
                self.one_stanza(field, child_schema, child_source, &path, !live, false)?;
            }
            StanzaKind::ArrayOfTables => match source.lookup(field.key) {
                Some(Node::Sequence(items)) if !items.is_empty() => {
                    for item in items {
                        let child_source = match item {
                            Node::Table(table) => Source::Instance(table),
                            _ => Source::Placeholders,
                        };
                        self.one_stanza(field, child_schema, child_source, &path, !live, true)?;
                    }
                }
                _ => {
                    // One sample element shows the element layout.
                    self.one_stanza(field, child_schema, Source::Placeholders, &path, !live, true)?;
                }
            },
        }
        self.stack.pop();
        Ok(())
    }

    fn one_stanza(
        &mut self,
        field: &FieldSpec,
        schema: &'static RecordSchema,
        source: Source<'_>,
        path: &[&'static str],
        muted: bool,
        array: bool,
    ) -> Result<(), SchemaError> {
        let mut head = String::new();
        for line in field.doc {
            head.push_str("# ");
            head.push_str(line);
            head.push('\n');
        }
        head.push_str(if field.default.is_required() {
            "# Mandatory.\n"
        } else {
            "# Optional.\n"
        });
        if muted {
            head.push('#');
        }
        let joined = path.join(".");
        if array {
            head.push_str(&format!("[[{joined}]]"));
        } else {
            head.push_str(&format!("[{joined}]"));
        }

        let inline: Vec<String> = schema
            .fields()
            .iter()
            .filter(|child| renders_inline(child, source))
            .map(|child| field_block(child, source, muted))
            .collect();
        let block = if inline.is_empty() {
            head
        } else {
            format!("{head}\n{}", inline.join("\n\n"))
        };
        self.blocks.push(block);

        for child in schema.fields() {
            if renders_inline(child, source) {
                continue;
            }
            if let Some((kind, handle)) = stanza_kind(&child.shape) {
                self.stanza(child, kind, handle, source, path, muted)?;
            }
        }
        Ok(())
    }
}

fn field_block(field: &FieldSpec, source: Source<'_>, muted: bool) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in field.doc {
        lines.push(format!("# {line}"));
    }
    if let Shape::Choice { variants, .. } = field.shape.unwrap_optional() {
        let list = variants
            .iter()
            .map(|variant| format!("\"{variant}\""))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("# One of: {list}."));
    }

    let default_node = field.default.render();
    if field.default.is_required() {
        lines.push("# Mandatory.".to_owned());
    } else if let Some(default) = &default_node {
        lines.push(format!("# Default: {}", literal(default)));
    } else {
        lines.push("# Optional.".to_owned());
    }

    let instance_value = source.lookup(field.key);
    let live = !muted && (field.default.is_required() || overrides(&default_node, instance_value));
    let value = match instance_value {
        Some(node) => literal(node),
        None => match &default_node {
            Some(default) => literal(default),
            None => placeholder(&field.shape),
        },
    };
    if live {
        lines.push(format!("{} = {}", key_literal(field.key), value));
    } else {
        lines.push(format!("#{} = {}", key_literal(field.key), value));
    }
    lines.join("\n")
}

/// An instance value keeps a non-mandatory line live only when it
/// actually changes what binding would produce.
fn overrides(default: &Option<Node>, instance: Option<&Node>) -> bool {
    match (default, instance) {
        (Some(default), Some(value)) => value != default,
        (None, Some(_)) => true,
        (_, None) => false,
    }
}

fn comment_lines(doc: &[&str]) -> String {
    doc.iter()
        .map(|line| format!("# {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A neutral, type-correct value for a live mandatory line.
fn placeholder(shape: &Shape) -> String {
    match shape {
        Shape::Scalar(kind) => match kind {
            ScalarKind::String => "\"\"".to_owned(),
            ScalarKind::Integer => "0".to_owned(),
            ScalarKind::Float => "0.0".to_owned(),
            ScalarKind::Boolean => "false".to_owned(),
            ScalarKind::Date => "1979-05-27".to_owned(),
            ScalarKind::Time => "07:32:00".to_owned(),
            ScalarKind::Datetime => "1979-05-27T07:32:00Z".to_owned(),
            ScalarKind::Duration => "\"0s\"".to_owned(),
        },
        Shape::Duration => "\"0s\"".to_owned(),
        Shape::Optional(inner) => placeholder(inner),
        Shape::List(_) => "[]".to_owned(),
        Shape::Tuple(items) => {
            let inner = items
                .iter()
                .map(placeholder)
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{inner}]")
        }
        Shape::Map(_) | Shape::Record(_) => "{}".to_owned(),
        Shape::Reference { .. } => "\"\"".to_owned(),
        Shape::Choice { variants, .. } => variants
            .first()
            .map(|variant| format!("\"{variant}\""))
            .unwrap_or_else(|| "\"\"".to_owned()),
    }
}

fn literal(node: &Node) -> String {
    match node {
        Node::Scalar(scalar) => scalar_literal(scalar),
        Node::Sequence(items) => {
            let inner = items.iter().map(literal).collect::<Vec<_>>().join(", ");
            format!("[{inner}]")
        }
        Node::Table(table) => {
            if table.is_empty() {
                return "{}".to_owned();
            }
            let inner = table
                .iter()
                .map(|(key, value)| format!("{} = {}", key_literal(key), literal(value)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{ {inner} }}")
        }
    }
}

fn scalar_literal(scalar: &Scalar) -> String {
    match scalar {
        Scalar::String(text) => string_literal(text),
        Scalar::Integer(value) => value.to_string(),
        Scalar::Float(value) => float_literal(*value),
        Scalar::Boolean(value) => value.to_string(),
        Scalar::Date(date) => date.to_string(),
        Scalar::Time(time) => time.to_string(),
        Scalar::Datetime(datetime) => datetime.to_string(),
        Scalar::Duration(value) => format!("\"{}\"", format_duration(*value)),
    }
}

fn float_literal(value: f64) -> String {
    if value.is_nan() {
        "nan".to_owned()
    } else if value.is_infinite() {
        if value < 0.0 { "-inf".to_owned() } else { "inf".to_owned() }
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn key_literal(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if bare {
        key.to_owned()
    } else {
        string_literal(key)
    }
}
