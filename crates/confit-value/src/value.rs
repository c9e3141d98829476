use std::time::Duration;

use indexmap::IndexMap;
use toml_datetime::{Date, Datetime, Time};

/// A parsed configuration value.
///
/// Produced by a text parser (or built programmatically) and consumed
/// read-only by the binding engine. Tables keep insertion order so that
/// diagnostics and templates are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Table(Table),
}

impl Node {
    /// Human-readable name of this node's shape, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Scalar(s) => s.kind().name(),
            Node::Sequence(_) => "sequence",
            Node::Table(_) => "table",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Node::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(Date),
    Time(Time),
    Datetime(Datetime),
    Duration(Duration),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Integer(_) => ScalarKind::Integer,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Boolean(_) => ScalarKind::Boolean,
            Scalar::Date(_) => ScalarKind::Date,
            Scalar::Time(_) => ScalarKind::Time,
            Scalar::Datetime(_) => ScalarKind::Datetime,
            Scalar::Duration(_) => ScalarKind::Duration,
        }
    }
}

/// The closed set of scalar kinds a [`Scalar`] can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Time,
    Datetime,
    Duration,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Date => "date",
            ScalarKind::Time => "time",
            ScalarKind::Datetime => "datetime",
            ScalarKind::Duration => "duration",
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An insertion-ordered string-keyed mapping.
///
/// Keys are unique; re-inserting a key replaces the value in place.
/// Removal shifts the remaining entries so their relative order is kept,
/// which the assembler relies on when it reports leftover keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    entries: IndexMap<String, Node>,
}

impl Table {
    pub fn new() -> Self {
        Table::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Node) -> Option<Node> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Node)> for Table {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Table {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<IndexMap<String, Node>> for Table {
    fn from(entries: IndexMap<String, Node>) -> Self {
        Table { entries }
    }
}

impl IntoIterator for Table {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Node::Scalar(Scalar::String(v.to_string()))
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Node::Scalar(Scalar::String(v))
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Node::Scalar(Scalar::Integer(v))
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Node::Scalar(Scalar::Float(v))
    }
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Node::Scalar(Scalar::Boolean(v))
    }
}

impl From<Duration> for Node {
    fn from(v: Duration) -> Self {
        Node::Scalar(Scalar::Duration(v))
    }
}

impl From<Scalar> for Node {
    fn from(v: Scalar) -> Self {
        Node::Scalar(v)
    }
}

impl From<Table> for Node {
    fn from(v: Table) -> Self {
        Node::Table(v)
    }
}

impl From<Vec<Node>> for Node {
    fn from(v: Vec<Node>) -> Self {
        Node::Sequence(v)
    }
}
