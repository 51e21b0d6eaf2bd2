use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use super::ApiClient;
use crate::response::{BodyDecoder, StandardDecoder};
use crate::transport::Transport;
use crate::validation::{ConstraintValidator, RequestValidator};

/// Builder for [`ApiClient`].
///
/// The transport is required; everything else has a default:
///
/// - **Validator**: [`ConstraintValidator`]
/// - **Body decoder**: [`StandardDecoder`]
/// - **Validation**: enabled
///
/// # Example
///
/// ```rust
/// use courtside_core::{ApiClient, ReqwestTransport};
///
/// let client = ApiClient::builder(ReqwestTransport::new())
///     .with_validation(false)
///     .build();
///
/// assert!(!client.validation_enabled());
/// ```
#[derive(derive_more::Debug)]
pub struct ApiClientBuilder<T, V = ConstraintValidator> {
    transport: T,
    validator: V,
    #[debug(skip)]
    decoder: Arc<dyn BodyDecoder>,
    validation: bool,
}

impl<T> ApiClientBuilder<T>
where
    T: Transport,
{
    pub(super) fn new(transport: T) -> Self {
        Self {
            transport,
            validator: ConstraintValidator,
            decoder: Arc::new(StandardDecoder),
            validation: true,
        }
    }
}

impl<T, V> ApiClientBuilder<T, V>
where
    T: Transport,
    V: RequestValidator,
{
    /// Replaces the validator.
    pub fn with_validator<W>(self, validator: W) -> ApiClientBuilder<T, W>
    where
        W: RequestValidator,
    {
        let Self {
            transport,
            decoder,
            validation,
            ..
        } = self;

        ApiClientBuilder {
            transport,
            validator,
            decoder,
            validation,
        }
    }

    /// Replaces the body decoder used by every response.
    #[must_use]
    pub fn with_decoder(mut self, decoder: impl BodyDecoder + 'static) -> Self {
        self.decoder = Arc::new(decoder);
        self
    }

    /// Sets the initial state of the validation flag (default `true`).
    #[must_use]
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validation = enabled;
        self
    }

    /// Builds the client.
    pub fn build(self) -> ApiClient<T, V> {
        let Self {
            transport,
            validator,
            decoder,
            validation,
        } = self;

        ApiClient {
            transport,
            validator,
            decoder,
            validation: AtomicBool::new(validation),
        }
    }
}
