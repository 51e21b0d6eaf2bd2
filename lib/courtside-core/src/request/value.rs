use chrono::NaiveDate;

/// Date format used when a field does not declare its own (`YYYY-MM-DD`).
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A loosely-typed field value.
///
/// Values often come straight from user input, so a `Text("2015")` is a perfectly
/// good candidate for a field declared as an integer. The validator checks the
/// semantic type, not the variant.
///
/// # Example
///
/// ```rust
/// use courtside_core::FieldValue;
///
/// let year = FieldValue::from(2015);
/// assert_eq!(year.render(None), "2015");
///
/// let date = FieldValue::from(chrono::NaiveDate::from_ymd_opt(2017, 10, 20).unwrap());
/// assert_eq!(date.render(None), "2017-10-20");
/// assert_eq!(date.render(Some("%Y%m%d")), "20171020");
/// ```
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum FieldValue {
    /// A boolean flag
    Bool(bool),
    /// An integer
    Int(i64),
    /// A floating point number
    Float(f64),
    /// Raw text
    Text(String),
    /// A calendar date
    Date(NaiveDate),
}

impl FieldValue {
    /// Renders the value as it goes on the wire (path segment or query value).
    ///
    /// Dates use `date_format`, or [`DEFAULT_DATE_FORMAT`] when `None`.
    pub fn render(&self, date_format: Option<&str>) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value.clone(),
            Self::Date(value) => value
                .format(date_format.unwrap_or(DEFAULT_DATE_FORMAT))
                .to_string(),
        }
    }

    /// Blank values are empty (or whitespace only) text.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    /// Integer interpretation, accepting integral floats and integer text.
    ///
    /// Text is read as it is rendered, so `" 42 "` and `"42.0"` are not integers.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value)
                if value.fract() == 0.0
                    && *value >= i64::MIN as f64
                    && *value < i64::MAX as f64 =>
            {
                Some(*value as i64)
            }
            Self::Text(text) => text.parse().ok(),
            _ => None,
        }
    }

    /// Numeric interpretation, accepting integers, floats and numeric text.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) if value.is_finite() => Some(*value),
            Self::Text(text) => text.parse::<f64>().ok().filter(|it| it.is_finite()),
            _ => None,
        }
    }

    /// Boolean interpretation, accepting `true`/`false` text.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Text(text) => text.parse().ok(),
            _ => None,
        }
    }

    /// Date interpretation, accepting `YYYY-MM-DD` text.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(value) => Some(*value),
            Self::Text(text) => NaiveDate::parse_from_str(text, DEFAULT_DATE_FORMAT).ok(),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        Self::Int(value.into())
    }
}
