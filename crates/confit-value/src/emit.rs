use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexMap;
use toml_datetime::{Date, Datetime, Time};

use crate::{Node, Scalar, Table};

/// Conversion into the value tree, the reverse direction of binding.
///
/// Used to serialize default values and placeholder instances into
/// template documents. The tree has no null, so `Option<T>` deliberately
/// has no implementation; an absent optional field is expressed by
/// leaving its key out of the enclosing [`Table`].
pub trait ToNode {
    fn to_node(&self) -> Node;
}

impl ToNode for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

impl ToNode for String {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::String(self.clone()))
    }
}

impl ToNode for &str {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::String((*self).to_string()))
    }
}

impl ToNode for bool {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Boolean(*self))
    }
}

impl ToNode for f64 {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Float(*self))
    }
}

impl ToNode for i64 {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Integer(*self))
    }
}

impl ToNode for i32 {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Integer(i64::from(*self)))
    }
}

impl ToNode for u16 {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Integer(i64::from(*self)))
    }
}

impl ToNode for u32 {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Integer(i64::from(*self)))
    }
}

/// Saturates at `i64::MAX`; the scalar integer kind is 64-bit signed.
impl ToNode for u64 {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Integer(i64::try_from(*self).unwrap_or(i64::MAX)))
    }
}

/// Saturates at `i64::MAX`; the scalar integer kind is 64-bit signed.
impl ToNode for usize {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Integer(i64::try_from(*self).unwrap_or(i64::MAX)))
    }
}

impl ToNode for Date {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Date(*self))
    }
}

impl ToNode for Time {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Time(*self))
    }
}

impl ToNode for Datetime {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Datetime(self.clone()))
    }
}

impl ToNode for Duration {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Duration(*self))
    }
}

impl ToNode for PathBuf {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::String(self.to_string_lossy().into_owned()))
    }
}

impl ToNode for Table {
    fn to_node(&self) -> Node {
        Node::Table(self.clone())
    }
}

impl<T: ToNode> ToNode for Vec<T> {
    fn to_node(&self) -> Node {
        Node::Sequence(self.iter().map(ToNode::to_node).collect())
    }
}

impl<T: ToNode> ToNode for Box<T> {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: ToNode> ToNode for IndexMap<String, T> {
    fn to_node(&self) -> Node {
        Node::Table(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_node()))
                .collect(),
        )
    }
}

macro_rules! impl_to_node_for_tuple {
    ($($name:ident : $index:tt),+) => {
        impl<$($name: ToNode),+> ToNode for ($($name,)+) {
            fn to_node(&self) -> Node {
                Node::Sequence(vec![$(self.$index.to_node()),+])
            }
        }
    };
}

impl_to_node_for_tuple!(A: 0, B: 1);
impl_to_node_for_tuple!(A: 0, B: 1, C: 2);
impl_to_node_for_tuple!(A: 0, B: 1, C: 2, D: 3);
