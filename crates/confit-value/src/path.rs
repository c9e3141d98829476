use core::fmt::Display;

/// One step of a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A table key, in its external spelling.
    Key(String),
    /// A sequence index.
    Index(usize),
}

/// A path from the bind root to a value, e.g. `webhooks[1].token`.
///
/// The empty path is the bind root and displays as `(root)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<PathSegment>);

impl KeyPath {
    pub fn root() -> Self {
        KeyPath(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.0.push(PathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.0.push(PathSegment::Index(index));
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for KeyPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        KeyPath(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_keys_and_indexes() {
        let mut path = KeyPath::root();
        path.push_key("webhooks");
        path.push_index(1);
        path.push_key("token");
        assert_eq!(path.to_string(), "webhooks[1].token");
        assert_eq!(path.segments().len(), 3);
        assert!(!path.is_root());
    }

    #[test]
    fn root_displays_as_root() {
        assert!(KeyPath::root().is_root());
        assert_eq!(KeyPath::root().to_string(), "(root)");
    }

    #[test]
    fn index_directly_under_root() {
        let mut path = KeyPath::root();
        path.push_index(0);
        path.push_key("url");
        assert_eq!(path.to_string(), "[0].url");
    }

    #[test]
    fn push_and_pop_are_symmetric() {
        let mut path = KeyPath::root();
        path.push_key("server");
        path.push_key("port");
        assert_eq!(path.pop(), Some(PathSegment::Key("port".into())));
        assert_eq!(path.to_string(), "server");
    }
}
