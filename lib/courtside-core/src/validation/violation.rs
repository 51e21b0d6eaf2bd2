use std::fmt;

use super::ConstraintKind;

/// A single failed constraint evaluation against a field value.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{field}: {message}")]
pub struct Violation {
    field: String,
    kind: ConstraintKind,
    message: String,
}

impl Violation {
    /// Creates a violation.
    pub fn new(field: impl Into<String>, kind: ConstraintKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    /// The field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The kind of constraint that failed.
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// A human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The ordered violations found by a validator; empty means valid.
///
/// Order follows field declaration order, then constraint declaration order within a
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_more::Deref, derive_more::From)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Whether no constraint failed.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Consumes the list.
    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
