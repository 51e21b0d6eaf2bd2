use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use url::Url;

use super::template::check_placeholders;
use super::{ApiRequest, ConstructionDefect, FieldValue};
use crate::response::ResponseType;
use crate::validation::Constraint;

/// Immutable configuration shared by every request of one API family.
///
/// # Example
///
/// ```rust
/// use courtside_core::ApiFamily;
/// use http::header::{ACCEPT, HeaderValue};
///
/// let family = ApiFamily::new("data", "http://data.nba.net")?
///     .with_header(ACCEPT, HeaderValue::from_static("application/json"));
///
/// assert_eq!(family.base_uri().as_str(), "http://data.nba.net/");
/// # Ok::<(), courtside_core::ConstructionDefect>(())
/// ```
#[derive(Debug, Clone)]
pub struct ApiFamily {
    name: &'static str,
    base_uri: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ApiFamily {
    /// Creates a family from its base URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionDefect::InvalidUrl`] if the base URI cannot be parsed.
    pub fn new(name: &'static str, base_uri: &str) -> Result<Self, ConstructionDefect> {
        let base_uri = base_uri
            .parse::<Url>()
            .map_err(|error| ConstructionDefect::InvalidUrl {
                url: base_uri.to_string(),
                error,
            })?;

        Ok(Self {
            name,
            base_uri,
            headers: HeaderMap::new(),
            timeout: None,
        })
    }

    /// Adds a default header sent with every request of the family.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the default timeout forwarded to the transport.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The family name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The base URI.
    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// The default headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The default timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Where a field goes when the request is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    /// Substituted into the endpoint template
    Path,
    /// Sent as a query parameter
    Query,
}

/// A declared field of a request definition.
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: &'static str,
    location: FieldLocation,
    default: Option<FieldValue>,
    constraints: Vec<Constraint>,
    wire_name: Option<&'static str>,
    date_format: Option<&'static str>,
}

impl FieldDef {
    fn new(name: &'static str, location: FieldLocation) -> Self {
        Self {
            name,
            location,
            default: None,
            constraints: Vec::new(),
            wire_name: None,
            date_format: None,
        }
    }

    /// A field substituted into the endpoint template.
    pub fn path(name: &'static str) -> Self {
        Self::new(name, FieldLocation::Path)
    }

    /// A field sent as a query parameter.
    pub fn query(name: &'static str) -> Self {
        Self::new(name, FieldLocation::Query)
    }

    /// Appends a constraint; constraints are evaluated in declaration order.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Sets the value used when the caller does not supply one.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the query parameter name, when it differs from the field name.
    #[must_use]
    pub fn wire_name(mut self, wire_name: &'static str) -> Self {
        self.wire_name = Some(wire_name);
        self
    }

    /// Sets the `chrono` format used to render date values.
    #[must_use]
    pub fn date_format(mut self, format: &'static str) -> Self {
        self.date_format = Some(format);
        self
    }

    /// The field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field location.
    pub fn location(&self) -> FieldLocation {
        self.location
    }

    /// The declared constraints, in order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The default value, if any.
    pub fn default(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    /// The name used in the query string.
    pub fn query_name(&self) -> &'static str {
        self.wire_name.unwrap_or(self.name)
    }

    /// Renders a value of this field for the wire.
    ///
    /// With a declared date format, any value that reads as a date (including
    /// `YYYY-MM-DD` text) is rendered in that format.
    pub fn render(&self, value: &FieldValue) -> String {
        match (self.date_format, value.as_date()) {
            (Some(format), Some(date)) => date.format(format).to_string(),
            _ => value.render(self.date_format),
        }
    }
}

/// The declarative description of one API operation.
///
/// Definitions are data: build them once (usually in a `static LazyLock`) and create
/// [`ApiRequest`]s from them with [`RequestDefinition::request`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use courtside_core::{ApiFamily, Constraint, FieldDef, RequestDefinition, ValueKind};
///
/// let family = Arc::new(ApiFamily::new("data", "http://data.nba.net")?);
/// let definition = RequestDefinition::builder(
///     "player-profile",
///     family,
///     "/data/prod/v1/{year}/players/{playerId}_profile.json",
/// )
/// .field(
///     FieldDef::path("year")
///         .constraint(Constraint::NotBlank)
///         .constraint(Constraint::Type(ValueKind::Int))
///         .constraint(Constraint::min(2015)),
/// )
/// .field(FieldDef::path("playerId").constraint(Constraint::NotBlank))
/// .build()?;
///
/// let request = definition.request().with("year", 2015).with("playerId", 201_939);
/// assert_eq!(request.endpoint(), "/data/prod/v1/{year}/players/{playerId}_profile.json");
/// # Ok::<(), courtside_core::ConstructionDefect>(())
/// ```
#[derive(Debug, Clone)]
pub struct RequestDefinition {
    name: &'static str,
    family: Arc<ApiFamily>,
    method: Method,
    endpoint: String,
    fields: Vec<FieldDef>,
    headers: HeaderMap,
    response_type: ResponseType,
}

impl RequestDefinition {
    /// Starts a definition with its name, family and endpoint template.
    pub fn builder(
        name: &'static str,
        family: Arc<ApiFamily>,
        endpoint: impl Into<String>,
    ) -> RequestDefinitionBuilder {
        RequestDefinitionBuilder {
            definition: Self {
                name,
                family,
                method: Method::GET,
                endpoint: endpoint.into(),
                fields: Vec::new(),
                headers: HeaderMap::new(),
                response_type: ResponseType::default(),
            },
        }
    }

    /// Creates a request bound to this definition, seeded with field defaults.
    pub fn request(&self) -> ApiRequest<'_> {
        ApiRequest::new(self)
    }

    /// The definition name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The API family.
    pub fn family(&self) -> &ApiFamily {
        &self.family
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The endpoint template.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The request-declared headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The declared response type.
    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    pub(crate) fn path_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields
            .iter()
            .filter(|field| field.location == FieldLocation::Path)
    }
}

/// Builder for [`RequestDefinition`].
#[derive(Debug, Clone)]
pub struct RequestDefinitionBuilder {
    definition: RequestDefinition,
}

impl RequestDefinitionBuilder {
    /// Sets the HTTP method (default `GET`).
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.definition.method = method;
        self
    }

    /// Declares the next field.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.definition.fields.push(field);
        self
    }

    /// Adds a request-declared header.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.definition.headers.insert(name, value);
        self
    }

    /// Sets the declared response type (default JSON).
    #[must_use]
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.definition.response_type = response_type;
        self
    }

    /// Checks the definition and builds it.
    ///
    /// # Errors
    ///
    /// - [`ConstructionDefect::DuplicateField`] if a field name is declared twice
    /// - [`ConstructionDefect::UnknownPlaceholder`] or
    ///   [`ConstructionDefect::PathFieldNotInTemplate`] if path fields and template
    ///   placeholders do not match one to one
    pub fn build(self) -> Result<RequestDefinition, ConstructionDefect> {
        let Self { definition } = self;

        let mut names = HashSet::new();
        if let Some(field) = definition
            .fields
            .iter()
            .find(|field| !names.insert(field.name))
        {
            return Err(ConstructionDefect::DuplicateField {
                request: definition.name,
                field: field.name.to_string(),
            });
        }

        check_placeholders(
            &definition.endpoint,
            definition.path_fields().map(FieldDef::name),
        )?;

        Ok(definition)
    }
}
