//! Runtime objects that reference fields resolve against.

use std::any::{Any, type_name};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use ahash::AHashMap;

use confit_value::{Node, Scalar, ToNode};

use crate::bind::Bind;
use crate::bind::context::BindContext;
use crate::bind::error::{BindErrorKind, Recorded};
use crate::schema::Shape;

/// Named runtime objects, looked up by [`Extern`] fields during a bind.
///
/// Entries are type-erased; retrieval succeeds only with the exact type
/// they were registered under.
#[derive(Default)]
pub struct Registry {
    entries: AHashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Registers `value` under `name`, replacing any previous entry.
    pub fn insert<T>(&mut self, name: impl Into<String>, value: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Box::new(value));
    }

    /// Chaining form of [`insert`](Registry::insert).
    pub fn with<T>(mut self, name: impl Into<String>, value: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.insert(name, value);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The entry under `name`, if it was registered as an `Arc<T>`.
    pub fn get<T>(&self, name: &str) -> Option<&Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.entries.get(name)?.downcast_ref::<Arc<T>>()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("entries", &names).finish()
    }
}

/// A field bound by looking its string value up in the [`Registry`].
///
/// The configuration carries only the name; the value is shared with
/// whoever registered it.
pub struct Extern<T: ?Sized> {
    name: String,
    value: Arc<T>,
}

impl<T: ?Sized> Extern<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn into_arc(self) -> Arc<T> {
        self.value
    }
}

impl<T: ?Sized> Deref for Extern<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: ?Sized> Clone for Extern<T> {
    fn clone(&self) -> Self {
        Extern {
            name: self.name.clone(),
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Extern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extern")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Handles are equal when they name the same registry entry.
impl<T: ?Sized> PartialEq for Extern<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T: ?Sized> Eq for Extern<T> {}

/// Emits the registration name; the referenced value itself never
/// round-trips through a document.
impl<T: ?Sized> ToNode for Extern<T> {
    fn to_node(&self) -> Node {
        Node::from(self.name.as_str())
    }
}

impl<T> Bind for Extern<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn shape() -> Shape {
        Shape::Reference {
            expects: type_name::<T>(),
        }
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        let Node::Scalar(Scalar::String(name)) = node else {
            return Err(cx.mismatch("string", node));
        };
        let registry = cx.registry();
        if !registry.contains(name) {
            return Err(cx.fail(BindErrorKind::ReferenceResolutionFailure {
                name: name.clone(),
                reason: "nothing is registered under this name".to_owned(),
            }));
        }
        match registry.get::<T>(name) {
            Some(value) => Ok(Extern {
                name: name.clone(),
                value: Arc::clone(value),
            }),
            None => Err(cx.fail(BindErrorKind::ReferenceResolutionFailure {
                name: name.clone(),
                reason: format!("the registered entry is not usable as `{}`", type_name::<T>()),
            })),
        }
    }
}
