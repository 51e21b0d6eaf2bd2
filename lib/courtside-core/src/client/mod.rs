use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use http::Method;
use tracing::debug;
use url::Url;

mod builder;
pub use self::builder::ApiClientBuilder;

mod error;
pub use self::error::ApiClientError;

use crate::request::{
    ApiRequest, CallDescriptor, CallOverrides, ConstructionDefect, resolve_endpoint,
};
use crate::response::{ApiResponse, BodyDecoder, ResponseType};
use crate::transport::Transport;
use crate::validation::{ConstraintValidator, RequestValidator, Violations};

/// Typed client for the NBA HTTP APIs.
///
/// Every [`ApiClient::send`] runs the same one-shot pipeline:
///
/// 1. validate the request (when validation is enabled)
/// 2. resolve the endpoint template with the path fields
/// 3. negotiate the `Accept` header from the declared response type
/// 4. assemble the [`CallDescriptor`], per-call overrides last
/// 5. dispatch it through the [`Transport`]
/// 6. wrap the answer in an [`ApiResponse`]
///
/// The client holds no per-call state and never retries. It can be shared across
/// tasks; the validation flag is the only mutable part.
///
/// # Example
///
/// ```rust,no_run
/// use courtside_core::catalog::stats::SCOREBOARD;
/// use courtside_core::{ApiClient, CallOverrides, ReqwestTransport};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(ReqwestTransport::new());
///
/// let request = SCOREBOARD.request().with("gameDate", "2017-10-20");
/// let response = client.send(&request, CallOverrides::new()).await?;
///
/// let scoreboard = response.json_value()?;
/// println!("{}", scoreboard["resultSets"][0]["name"]);
/// # Ok(())
/// # }
/// ```
#[derive(derive_more::Debug)]
pub struct ApiClient<T, V = ConstraintValidator> {
    transport: T,
    validator: V,
    #[debug(skip)]
    decoder: Arc<dyn BodyDecoder>,
    validation: AtomicBool,
}

// Create
impl<T> ApiClient<T>
where
    T: Transport,
{
    /// A client with the default validator and decoder, validation enabled.
    pub fn new(transport: T) -> Self {
        Self::builder(transport).build()
    }

    /// Starts configuring a client around `transport`.
    pub fn builder(transport: T) -> ApiClientBuilder<T> {
        ApiClientBuilder::new(transport)
    }
}

// Validation flag
impl<T, V> ApiClient<T, V> {
    /// Whether [`ApiClient::send`] validates requests before dispatch.
    pub fn validation_enabled(&self) -> bool {
        self.validation.load(Ordering::Relaxed)
    }

    /// Turns validation on or off.
    ///
    /// Calls already past their validation step are not affected; configure the flag
    /// before sharing the client when ordering matters.
    pub fn set_validation_enabled(&self, enabled: bool) -> &Self {
        self.validation.store(enabled, Ordering::Relaxed);
        self
    }
}

// Pipeline
impl<T, V> ApiClient<T, V>
where
    T: Transport,
    V: RequestValidator,
{
    /// Runs the validator on `request`, whatever the validation flag.
    pub fn validate(&self, request: &ApiRequest<'_>) -> Violations {
        self.validator.validate(request)
    }

    /// Builds the call descriptor for `request` without any I/O and without validation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionDefect`] if a value is bound to an undeclared field, a
    /// path field has no value, the path fields and the endpoint template disagree,
    /// or the resulting URL is invalid.
    pub fn prepare(
        &self,
        request: &ApiRequest<'_>,
        overrides: &CallOverrides,
    ) -> Result<CallDescriptor, ConstructionDefect> {
        request.check_declared()?;

        let path = resolve_endpoint(request.endpoint(), &request.path_args())?;
        let accept = request.response_type().accept_header();

        CallDescriptor::assemble(request, path, accept, overrides)
    }

    /// Validates, assembles and dispatches `request`.
    ///
    /// # Errors
    ///
    /// - [`ApiClientError::Construction`] if the request cannot be built
    /// - [`ApiClientError::Validation`] if validation is enabled and a constraint fails
    /// - [`ApiClientError::Transport`] if the exchange fails
    ///
    /// Nothing is dispatched in the first two cases. Decoding errors surface later,
    /// from the [`ApiResponse`] accessors.
    pub async fn send(
        &self,
        request: &ApiRequest<'_>,
        overrides: CallOverrides,
    ) -> Result<ApiResponse, ApiClientError> {
        request.check_declared()?;

        if self.validation_enabled() {
            let violations = self.validate(request);
            if !violations.is_valid() {
                return Err(ApiClientError::Validation {
                    request: request.name(),
                    violations,
                });
            }
        }

        let descriptor = self.prepare(request, &overrides)?;
        self.dispatch(request.name(), &descriptor, request.response_type())
            .await
    }

    /// Sends a request to an arbitrary URL, bypassing definitions and validation.
    ///
    /// Only the override headers, query parameters and timeout apply. The body is
    /// decoded as [`ResponseType::Unspecified`] text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Transport`] if the exchange fails.
    pub async fn raw_send(
        &self,
        method: Method,
        url: Url,
        overrides: CallOverrides,
    ) -> Result<ApiResponse, ApiClientError> {
        let descriptor = CallDescriptor::raw(method, url, &overrides);
        self.dispatch("raw", &descriptor, ResponseType::Unspecified)
            .await
    }

    async fn dispatch(
        &self,
        request: &'static str,
        descriptor: &CallDescriptor,
        response_type: ResponseType,
    ) -> Result<ApiResponse, ApiClientError> {
        debug!(request, method = %descriptor.method, url = %descriptor.url, "dispatching");
        let raw = self
            .transport
            .dispatch(&descriptor.method, &descriptor.url, descriptor)
            .await
            .map_err(|source| ApiClientError::Transport {
                request,
                endpoint: descriptor.url.to_string(),
                source,
            })?;
        debug!(request, status = %raw.status, "dispatched");

        Ok(ApiResponse::new(raw, response_type, Arc::clone(&self.decoder)))
    }
}

impl<T> Default for ApiClient<T>
where
    T: Transport + Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
