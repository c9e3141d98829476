//! Diagnostics accumulated while binding a value tree.

use std::fmt;

use confit_value::KeyPath;
use thiserror::Error;

/// What went wrong at one spot in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindErrorKind {
    #[error("missing required key `{key}`")]
    MissingField { key: String },
    #[error("unknown key `{key}`")]
    UnknownKey { key: String },
    #[error("expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
    #[error("cannot resolve reference `{name}`: {reason}")]
    ReferenceResolutionFailure { name: String, reason: String },
}

/// One diagnostic, located by the path where it was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    pub path: KeyPath,
    pub kind: BindErrorKind,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

impl std::error::Error for BindError {}

/// Everything that went wrong in a single bind, in discovery order.
///
/// Binding never stops at the first problem: siblings keep being
/// checked so a single run reports the full set of mistakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindReport {
    errors: Vec<BindError>,
}

impl BindReport {
    pub(crate) fn new(errors: Vec<BindError>) -> Self {
        BindReport { errors }
    }

    pub fn errors(&self) -> &[BindError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<BindError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for BindReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.errors.len() == 1 { "" } else { "s" };
        write!(f, "{} binding error{}", self.errors.len(), plural)?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BindReport {}

impl IntoIterator for BindReport {
    type Item = BindError;
    type IntoIter = std::vec::IntoIter<BindError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Marker for "a diagnostic was already pushed onto the context".
///
/// Coercions return this instead of the error itself so that callers
/// can keep going (collecting further errors) without ever dropping a
/// diagnostic on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded;
