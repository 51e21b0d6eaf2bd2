use std::cmp::Ordering;

use chrono::NaiveDate;
use regex::Regex;

use super::Violation;
use crate::request::FieldValue;

/// The semantic type a field value must be representable as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ValueKind {
    /// An integer, or text holding one
    #[display("int")]
    Int,
    /// Any finite number, or text holding one
    #[display("numeric")]
    Number,
    /// Text
    #[display("string")]
    Text,
    /// A boolean, or `true`/`false` text
    #[display("bool")]
    Bool,
    /// A date, or `YYYY-MM-DD` text
    #[display("date")]
    Date,
}

impl ValueKind {
    fn accepts(self, value: &FieldValue) -> bool {
        match self {
            Self::Int => value.as_int().is_some(),
            Self::Number => value.as_number().is_some(),
            Self::Text => matches!(value, FieldValue::Text(_)),
            Self::Bool => value.as_bool().is_some(),
            Self::Date => value.as_date().is_some(),
        }
    }
}

/// One side of a [`Constraint::Range`].
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::From)]
pub enum RangeBound {
    /// A numeric bound
    Number(f64),
    /// A date bound
    #[display("{}", _0.format(crate::request::DEFAULT_DATE_FORMAT))]
    Date(NaiveDate),
}

impl From<i64> for RangeBound {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for RangeBound {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

/// Which kind of constraint produced a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConstraintKind {
    /// [`Constraint::NotBlank`]
    #[display("not-blank")]
    NotBlank,
    /// [`Constraint::Type`]
    #[display("type")]
    Type,
    /// [`Constraint::Range`]
    #[display("range")]
    Range,
    /// [`Constraint::Choice`]
    #[display("choice")]
    Choice,
    /// [`Constraint::Regex`]
    #[display("regex")]
    Regex,
}

/// A declarative rule attached to a single field.
///
/// Constraints are pure predicates over one value. An absent value only violates
/// [`Constraint::NotBlank`]; every other constraint accepts it.
///
/// # Example
///
/// ```rust
/// use courtside_core::{Constraint, FieldValue, ValueKind};
///
/// let constraints = [
///     Constraint::NotBlank,
///     Constraint::Type(ValueKind::Int),
///     Constraint::min(2015),
/// ];
///
/// let value = FieldValue::from("2014");
/// let failures: Vec<_> = constraints
///     .iter()
///     .filter_map(|constraint| constraint.check("year", Some(&value)))
///     .collect();
/// assert_eq!(failures.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub enum Constraint {
    /// The value must be present and not empty text.
    NotBlank,
    /// The value must be representable as the given kind.
    Type(ValueKind),
    /// The value must lie within the bounds; a missing bound is unbounded.
    Range {
        /// Inclusive lower bound
        min: Option<RangeBound>,
        /// Inclusive upper bound
        max: Option<RangeBound>,
    },
    /// The rendered value must be one of a closed option set.
    Choice(&'static [&'static str]),
    /// The rendered value must match the pattern.
    Regex(Regex),
}

impl Constraint {
    /// A range with only a lower bound.
    pub fn min(min: impl Into<RangeBound>) -> Self {
        Self::Range {
            min: Some(min.into()),
            max: None,
        }
    }

    /// A range with only an upper bound.
    pub fn max(max: impl Into<RangeBound>) -> Self {
        Self::Range {
            min: None,
            max: Some(max.into()),
        }
    }

    /// A range with both bounds.
    pub fn range(min: impl Into<RangeBound>, max: impl Into<RangeBound>) -> Self {
        Self::Range {
            min: Some(min.into()),
            max: Some(max.into()),
        }
    }

    /// A regex constraint from a pattern.
    ///
    /// # Errors
    ///
    /// Fails if the pattern is not a valid regular expression.
    pub fn matches(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Regex)
    }

    /// The kind of this constraint.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::NotBlank => ConstraintKind::NotBlank,
            Self::Type(_) => ConstraintKind::Type,
            Self::Range { .. } => ConstraintKind::Range,
            Self::Choice(_) => ConstraintKind::Choice,
            Self::Regex(_) => ConstraintKind::Regex,
        }
    }

    /// Evaluates the constraint against a field value.
    ///
    /// Returns the violation, if any.
    pub fn check(&self, field: &str, value: Option<&FieldValue>) -> Option<Violation> {
        let message = match (self, value) {
            (Self::NotBlank, None) => Some("This value should not be blank.".to_string()),
            (Self::NotBlank, Some(value)) => value
                .is_blank()
                .then(|| "This value should not be blank.".to_string()),
            (_, None) => None,
            (Self::Type(kind), Some(value)) => (!kind.accepts(value))
                .then(|| format!("This value should be of type {kind}.")),
            (Self::Range { min, max }, Some(value)) => {
                check_range(min.as_ref(), max.as_ref(), value)
            }
            (Self::Choice(options), Some(value)) => {
                let rendered = value.render(None);
                (!options.contains(&rendered.as_str()))
                    .then(|| "The value you selected is not a valid choice.".to_string())
            }
            (Self::Regex(regex), Some(value)) => (!regex.is_match(&value.render(None)))
                .then(|| "This value is not valid.".to_string()),
        }?;

        Some(Violation::new(field, self.kind(), message))
    }
}

fn check_range(
    min: Option<&RangeBound>,
    max: Option<&RangeBound>,
    value: &FieldValue,
) -> Option<String> {
    if let Some(min) = min {
        match compare(value, min) {
            None => return Some(invalid_for(min)),
            Some(Ordering::Less) => return Some(format!("This value should be {min} or more.")),
            Some(_) => {}
        }
    }
    if let Some(max) = max {
        match compare(value, max) {
            None => return Some(invalid_for(max)),
            Some(Ordering::Greater) => {
                return Some(format!("This value should be {max} or less."));
            }
            Some(_) => {}
        }
    }
    None
}

/// Orders the value against the bound, `None` if they are not comparable.
fn compare(value: &FieldValue, bound: &RangeBound) -> Option<Ordering> {
    match bound {
        RangeBound::Number(limit) => value
            .as_number()
            .and_then(|number| number.partial_cmp(limit)),
        RangeBound::Date(limit) => value.as_date().map(|date| date.cmp(limit)),
    }
}

fn invalid_for(bound: &RangeBound) -> String {
    match bound {
        RangeBound::Number(_) => "This value should be a valid number.".to_string(),
        RangeBound::Date(_) => "This value should be a valid date.".to_string(),
    }
}
