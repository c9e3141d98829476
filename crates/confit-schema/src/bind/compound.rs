//! [`Bind`] impls for containers of other bindable types.

use confit_value::Node;
use indexmap::IndexMap;

use crate::bind::Bind;
use crate::bind::context::BindContext;
use crate::bind::error::{BindErrorKind, Recorded};
use crate::schema::Shape;

impl<T: Bind> Bind for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }

    /// A present node always coerces to `Some`. Absence never reaches
    /// here; the record cursor resolves missing keys to `None`.
    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        T::coerce(node, cx).map(Some)
    }
}

impl<T: Bind> Bind for Vec<T> {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        let Node::Sequence(items) = node else {
            return Err(cx.mismatch("sequence", node));
        };
        let mut out = Vec::with_capacity(items.len());
        let mut failed = false;
        for (index, item) in items.iter().enumerate() {
            cx.push_index(index);
            match T::coerce(item, cx) {
                Ok(value) => out.push(value),
                Err(Recorded) => failed = true,
            }
            cx.pop();
        }
        if failed { Err(Recorded) } else { Ok(out) }
    }
}

impl<T: Bind> Bind for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        T::coerce(node, cx).map(Box::new)
    }
}

impl<T: Bind> Bind for IndexMap<String, T> {
    fn shape() -> Shape {
        Shape::Map(Box::new(T::shape()))
    }

    /// Map keys are user data; they pass through untranslated.
    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        let Node::Table(table) = node else {
            return Err(cx.mismatch("table", node));
        };
        let mut out = IndexMap::with_capacity(table.len());
        let mut failed = false;
        for (key, value) in table.iter() {
            cx.push_key(key);
            match T::coerce(value, cx) {
                Ok(value) => {
                    out.insert(key.to_owned(), value);
                }
                Err(Recorded) => failed = true,
            }
            cx.pop();
        }
        if failed { Err(Recorded) } else { Ok(out) }
    }
}

macro_rules! impl_bind_for_tuple {
    ($len:literal => $(($name:ident, $binding:ident, $index:tt)),+) => {
        impl<$($name: Bind),+> Bind for ($($name,)+) {
            fn shape() -> Shape {
                Shape::Tuple(vec![$($name::shape()),+])
            }

            fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
                let Node::Sequence(items) = node else {
                    return Err(cx.mismatch(concat!("sequence of length ", $len), node));
                };
                if items.len() != $len {
                    // Arity is one error; elements are not checked when
                    // the lengths already disagree.
                    return Err(cx.fail(BindErrorKind::TypeMismatch {
                        expected: concat!("sequence of length ", $len).to_owned(),
                        actual: format!("sequence of length {}", items.len()),
                    }));
                }
                $(
                    cx.push_index($index);
                    let $binding = $name::coerce(&items[$index], cx);
                    cx.pop();
                )+
                Ok(($($binding?,)+))
            }
        }
    };
}

impl_bind_for_tuple!(2 => (A, a, 0), (B, b, 1));
impl_bind_for_tuple!(3 => (A, a, 0), (B, b, 1), (C, c, 2));
impl_bind_for_tuple!(4 => (A, a, 0), (B, b, 1), (C, c, 2), (D, d, 3));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::error::BindReport;
    use crate::registry::Registry;
    use confit_value::Table;

    fn coerce_one<T: Bind>(node: Node) -> Result<T, BindReport> {
        let registry = Registry::new();
        let cx = BindContext::new(&registry);
        let value = T::coerce(&node, &cx);
        match (cx.finish(), value) {
            (Ok(()), Ok(value)) => Ok(value),
            (Err(report), _) => Err(report),
            _ => unreachable!(),
        }
    }

    #[test]
    fn lists_collect_every_element_error() {
        let node = Node::from(vec![Node::from(1), Node::from("two"), Node::from(true)]);
        let report = coerce_one::<Vec<i64>>(node).unwrap_err();
        assert_eq!(report.len(), 2);
        assert_eq!(report.errors()[0].path.to_string(), "[1]");
        assert_eq!(report.errors()[1].path.to_string(), "[2]");

        let node = Node::from(vec![Node::from(1), Node::from(2)]);
        assert_eq!(coerce_one::<Vec<i64>>(node).unwrap(), vec![1, 2]);
    }

    #[test]
    fn tuple_arity_mismatch_is_a_single_error() {
        let node = Node::from(vec![Node::from("only")]);
        let report = coerce_one::<(String, i64)>(node).unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.errors()[0].kind,
            BindErrorKind::TypeMismatch {
                expected: "sequence of length 2".to_owned(),
                actual: "sequence of length 1".to_owned(),
            }
        );
    }

    #[test]
    fn tuple_elements_are_checked_in_place() {
        let node = Node::from(vec![Node::from(1), Node::from(2)]);
        let report = coerce_one::<(String, i64)>(node).unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors()[0].path.to_string(), "[0]");

        let node = Node::from(vec![Node::from("db"), Node::from(5432)]);
        assert_eq!(
            coerce_one::<(String, i64)>(node).unwrap(),
            ("db".to_owned(), 5432)
        );
    }

    #[test]
    fn map_keys_pass_through_untranslated() {
        let table = Table::from_iter([
            ("Primary-DB".to_owned(), Node::from(5432)),
            ("replica_db".to_owned(), Node::from(5433)),
        ]);
        let map = coerce_one::<IndexMap<String, i64>>(Node::Table(table)).unwrap();
        assert_eq!(
            map.keys().collect::<Vec<_>>(),
            vec!["Primary-DB", "replica_db"]
        );
        assert_eq!(map["Primary-DB"], 5432);
    }

    #[test]
    fn map_value_errors_carry_their_key() {
        let table = Table::from_iter([
            ("alpha".to_owned(), Node::from(1)),
            ("beta".to_owned(), Node::from("two")),
        ]);
        let report = coerce_one::<IndexMap<String, i64>>(Node::Table(table)).unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors()[0].path.to_string(), "beta");
    }

    #[test]
    fn present_nodes_coerce_to_some() {
        assert_eq!(coerce_one::<Option<u16>>(Node::from(80)).unwrap(), Some(80));
    }
}
