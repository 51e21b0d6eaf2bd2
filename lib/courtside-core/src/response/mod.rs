//! Response typing, content negotiation and decoding.
//!
//! - [`ResponseType`] - the declared body type, and its `Accept` header
//! - [`ApiResponse`] - the typed wrapper returned by the client
//! - [`BodyDecoder`] - how bodies are decoded ([`StandardDecoder`] by default)

use std::sync::{Arc, OnceLock};

use bytes::Bytes;
use headers::{ContentType, HeaderMapExt};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

mod decode;
pub(crate) use self::decode::truncate_body;
pub use self::decode::{BodyDecoder, DecodeError, DecodedBody, StandardDecoder};

mod kind;
pub use self::kind::ResponseType;

use crate::transport::RawResponse;

/// A successful HTTP exchange with its declared response type.
///
/// The body is decoded lazily, once: repeated calls to [`ApiResponse::decoded`]
/// return the cached result.
///
/// # Example
///
/// ```rust,no_run
/// use courtside_core::catalog::data::PLAYER_PROFILE;
/// use courtside_core::{ApiClient, CallOverrides, ReqwestTransport};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(ReqwestTransport::new());
/// let request = PLAYER_PROFILE.request().with("year", 2017).with("playerId", 201_939);
///
/// let response = client.send(&request, CallOverrides::new()).await?;
/// println!("status: {}", response.status());
/// if let Some(profile) = response.decoded()?.as_json() {
///     println!("{profile:#}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(derive_more::Debug)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    #[debug("{} bytes", body.len())]
    body: Bytes,
    response_type: ResponseType,
    #[debug(skip)]
    decoder: Arc<dyn BodyDecoder>,
    #[debug(skip)]
    decoded: OnceLock<Result<DecodedBody, DecodeError>>,
}

impl ApiResponse {
    pub(crate) fn new(
        raw: RawResponse,
        response_type: ResponseType,
        decoder: Arc<dyn BodyDecoder>,
    ) -> Self {
        let RawResponse {
            status,
            headers,
            body,
        } = raw;

        Self {
            status,
            headers,
            body,
            response_type,
            decoder,
            decoded: OnceLock::new(),
        }
    }

    /// The HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The parsed `Content-Type` header, if present and valid.
    pub fn content_type(&self) -> Option<ContentType> {
        self.headers.typed_get::<ContentType>()
    }

    /// The declared response type.
    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    /// The raw body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// The body as text, whatever the declared type.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidUtf8`] if the body is not UTF-8.
    pub fn text(&self) -> Result<String, DecodeError> {
        decode::decode_text(&self.body)
    }

    /// The body decoded per the declared response type.
    ///
    /// Decoding runs on first access only; later calls return the same value.
    ///
    /// # Errors
    ///
    /// Returns the (cached) [`DecodeError`] if the body does not match the declared type.
    pub fn decoded(&self) -> Result<&DecodedBody, DecodeError> {
        self.decoded
            .get_or_init(|| self.decoder.decode(self.response_type, &self.body))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The JSON value of the body (a script's embedded payload for JS responses).
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if decoding fails or the body holds no JSON.
    pub fn json_value(&self) -> Result<&serde_json::Value, DecodeError> {
        let decoded = self.decoded()?;
        decoded.as_json().ok_or_else(|| DecodeError::Json {
            path: ".".to_string(),
            message: format!("no JSON in a {} response", self.response_type),
            body: truncate_body(&String::from_utf8_lossy(&self.body)),
        })
    }

    /// Deserializes the body into `T`, reporting the path of any mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] if the body is not a valid `T`.
    pub fn json<T>(&self) -> Result<T, DecodeError>
    where
        T: DeserializeOwned,
    {
        decode::decode_json(&self.body)
    }
}
