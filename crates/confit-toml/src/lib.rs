//! TOML front end: turns source text into the confit value tree.
//!
//! The walk covers every [`toml_edit::Item`] a parsed document can hold:
//! inline values, standard tables, and arrays of tables. TOML datetimes
//! carry optional date and time halves, so they are split here into the
//! tree's distinct date, time, and datetime scalar kinds.

use confit_value::{Node, Scalar, Table};
use toml_edit::{DocumentMut, Item, Value};

/// Failure to parse TOML source text.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ParseError(#[from] toml_edit::TomlError);

/// Parses TOML source into a table-rooted [`Node`].
pub fn parse(source: &str) -> Result<Node, ParseError> {
    let doc: DocumentMut = source.parse()?;
    let root = table_node(doc.as_table());
    log::debug!(
        "parsed TOML document with {} top-level key(s)",
        root.len()
    );
    Ok(Node::Table(root))
}

fn table_node(table: &toml_edit::Table) -> Table {
    table
        .iter()
        .filter_map(|(key, item)| item_node(item).map(|node| (key.to_string(), node)))
        .collect()
}

fn item_node(item: &Item) -> Option<Node> {
    match item {
        Item::Value(value) => Some(value_node(value)),
        Item::Table(table) => Some(Node::Table(table_node(table))),
        Item::ArrayOfTables(tables) => Some(Node::Sequence(
            tables
                .iter()
                .map(|table| Node::Table(table_node(table)))
                .collect(),
        )),
        Item::None => None,
    }
}

fn value_node(value: &Value) -> Node {
    match value {
        Value::String(s) => Node::Scalar(Scalar::String(s.value().clone())),
        Value::Integer(i) => Node::Scalar(Scalar::Integer(*i.value())),
        Value::Float(f) => Node::Scalar(Scalar::Float(*f.value())),
        Value::Boolean(b) => Node::Scalar(Scalar::Boolean(*b.value())),
        Value::Datetime(dt) => Node::Scalar(datetime_scalar(dt.value())),
        Value::Array(items) => Node::Sequence(items.iter().map(value_node).collect()),
        Value::InlineTable(table) => Node::Table(
            table
                .iter()
                .map(|(key, value)| (key.to_string(), value_node(value)))
                .collect(),
        ),
    }
}

fn datetime_scalar(dt: &toml_edit::Datetime) -> Scalar {
    match (dt.date, dt.time) {
        (Some(date), None) => Scalar::Date(date),
        (None, Some(time)) => Scalar::Time(time),
        _ => Scalar::Datetime(dt.clone()),
    }
}
