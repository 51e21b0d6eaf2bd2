/// A mismatch between a request definition and the values bound to it.
///
/// These are programming errors in the request catalog (or in the caller's use of it),
/// not runtime data errors: they are reported immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum ConstructionDefect {
    /// The endpoint template references a placeholder without a matching path field.
    #[display("Endpoint '{template}' has no path field for placeholder '{placeholder}'")]
    UnknownPlaceholder {
        /// The endpoint template
        template: String,
        /// The placeholder name
        placeholder: String,
    },

    /// A field declared as a path field does not appear in the endpoint template.
    #[display("Path field '{field}' does not appear in endpoint '{template}'")]
    PathFieldNotInTemplate {
        /// The endpoint template
        template: String,
        /// The path field name
        field: String,
    },

    /// A path field has no value (and no default) at resolution time.
    #[display("Endpoint '{template}' is missing a value for path field '{field}'")]
    MissingPathValue {
        /// The endpoint template
        template: String,
        /// The path field name
        field: String,
    },

    /// The same field name is declared twice.
    #[display("Request '{request}' declares field '{field}' more than once")]
    DuplicateField {
        /// The request definition name
        request: &'static str,
        /// The duplicated field name
        field: String,
    },

    /// A value was bound to a field the request does not declare.
    #[display("Request '{request}' has no field named '{field}'")]
    UnknownField {
        /// The request definition name
        request: &'static str,
        /// The undeclared field name
        field: String,
    },

    /// The base URI and the resolved path do not form a valid URL.
    #[display("Invalid URL '{url}': {error}")]
    InvalidUrl {
        /// The URL that failed to parse
        url: String,
        /// The parse error
        error: url::ParseError,
    },
}
