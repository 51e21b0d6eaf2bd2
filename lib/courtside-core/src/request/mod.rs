//! Request definitions, request instances and call assembly.
//!
//! - [`ApiFamily`] - per-family base URI, default headers and timeout
//! - [`RequestDefinition`] - one API operation: method, endpoint template, fields
//! - [`ApiRequest`] - a definition bound to field values
//! - [`CallDescriptor`] - the fully merged description of one HTTP exchange

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use indexmap::IndexMap;

mod defect;
pub use self::defect::ConstructionDefect;

mod definition;
pub use self::definition::{
    ApiFamily, FieldDef, FieldLocation, RequestDefinition, RequestDefinitionBuilder,
};

mod descriptor;
pub use self::descriptor::{CallDescriptor, CallOverrides};

mod template;
pub use self::template::{placeholders, resolve_endpoint};

mod value;
pub use self::value::{DEFAULT_DATE_FORMAT, FieldValue};

use crate::response::ResponseType;

/// A request definition bound to field values.
///
/// Field values start from the declared defaults. The request is never mutated by the
/// client; use the `with_*` methods or the explicit setters to change it.
///
/// # Example
///
/// ```rust
/// use courtside_core::catalog::data::PLAYER_PROFILE;
/// use courtside_core::FieldValue;
///
/// let mut request = PLAYER_PROFILE.request().with("year", 2015);
/// request.set("playerId", 201_939)?;
///
/// assert_eq!(request.value("playerId"), Some(&FieldValue::Int(201_939)));
/// # Ok::<(), courtside_core::ConstructionDefect>(())
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest<'def> {
    definition: &'def RequestDefinition,
    values: IndexMap<&'static str, FieldValue>,
    undeclared: Vec<String>,
    method: Option<Method>,
    endpoint: Option<String>,
    headers: HeaderMap,
    response_type: Option<ResponseType>,
}

impl<'def> ApiRequest<'def> {
    pub(crate) fn new(definition: &'def RequestDefinition) -> Self {
        let values = definition
            .fields()
            .iter()
            .filter_map(|field| field.default().map(|value| (field.name(), value.clone())))
            .collect();

        Self {
            definition,
            values,
            undeclared: Vec::new(),
            method: None,
            endpoint: None,
            headers: HeaderMap::new(),
            response_type: None,
        }
    }

    /// Sets a field value.
    ///
    /// An undeclared field is recorded and reported as a
    /// [`ConstructionDefect::UnknownField`] when the request is sent.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        if self.set(name, value).is_err() {
            self.undeclared.push(name.to_string());
        }
        self
    }

    /// Sets a field value, failing on an undeclared field.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionDefect::UnknownField`] if the definition has no such field.
    pub fn try_with(mut self, name: &str, value: impl Into<FieldValue>) -> Result<Self, ConstructionDefect> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Sets a field value in place.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionDefect::UnknownField`] if the definition has no such field.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<&mut Self, ConstructionDefect> {
        let field = self
            .definition
            .field(name)
            .ok_or_else(|| ConstructionDefect::UnknownField {
                request: self.definition.name(),
                field: name.to_string(),
            })?;
        self.values.insert(field.name(), value.into());
        Ok(self)
    }

    /// Removes a field value (the declared default is not restored).
    pub fn unset(&mut self, name: &str) -> Option<FieldValue> {
        self.values.shift_remove(name)
    }

    /// Overrides the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Overrides the endpoint template; path fields must still match its placeholders.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Adds a header on top of the definition's headers.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Overrides the declared response type.
    #[must_use]
    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// The definition this request is bound to.
    pub fn definition(&self) -> &'def RequestDefinition {
        self.definition
    }

    /// The definition name.
    pub fn name(&self) -> &'static str {
        self.definition.name()
    }

    /// The value bound to a field.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Every declared field with its value, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'def FieldDef, Option<&FieldValue>)> {
        self.definition
            .fields()
            .iter()
            .map(|field| (field, self.values.get(field.name())))
    }

    /// The effective HTTP method.
    pub fn method(&self) -> &Method {
        self.method.as_ref().unwrap_or(self.definition.method())
    }

    /// The effective endpoint template.
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or(self.definition.endpoint())
    }

    /// The request-declared headers: definition headers, then per-request headers.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = self.definition.headers().clone();
        descriptor::merge_headers(&mut headers, &self.headers);
        headers
    }

    /// The effective response type.
    pub fn response_type(&self) -> ResponseType {
        self.response_type
            .unwrap_or(self.definition.response_type())
    }

    /// Fails if a value was bound to an undeclared field.
    pub(crate) fn check_declared(&self) -> Result<(), ConstructionDefect> {
        match self.undeclared.first() {
            Some(field) => Err(ConstructionDefect::UnknownField {
                request: self.name(),
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Rendered values of the path fields, `None` for missing ones.
    pub(crate) fn path_args(&self) -> IndexMap<&'static str, Option<String>> {
        self.definition
            .path_fields()
            .map(|field| {
                let value = self.values.get(field.name()).map(|value| field.render(value));
                (field.name(), value)
            })
            .collect()
    }

    /// Rendered query parameters, in field declaration order.
    pub(crate) fn query_params(&self) -> IndexMap<String, String> {
        self.fields()
            .filter(|(field, _)| field.location() == FieldLocation::Query)
            .filter_map(|(field, value)| {
                value.map(|value| (field.query_name().to_string(), field.render(value)))
            })
            .collect()
    }
}
