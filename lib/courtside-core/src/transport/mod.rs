//! The HTTP transport seam.
//!
//! The client never talks to the network itself: it hands a fully assembled
//! [`CallDescriptor`] to a [`Transport`]. [`ReqwestTransport`] is the production
//! implementation; tests substitute their own.

use std::error::Error;
use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

use crate::request::CallDescriptor;

mod reqwest_transport;
pub use self::reqwest_transport::ReqwestTransport;

/// The raw outcome of a successful (2xx) exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// The HTTP status
    pub status: StatusCode,
    /// The response headers
    pub headers: HeaderMap,
    /// The response body
    pub body: Bytes,
}

impl RawResponse {
    /// A `200 OK` response with the given body and no headers.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// A failed exchange.
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum TransportError {
    /// The request never produced a response (connection, timeout, TLS...).
    #[display("Network failure: {source}")]
    Network {
        /// The underlying failure
        source: Box<dyn Error + Send + Sync>,
    },

    /// The server answered with a non-success status.
    #[display("Unexpected status code {status}: {body}")]
    Status {
        /// The HTTP status
        status: StatusCode,
        /// The (possibly truncated) body
        body: String,
    },
}

impl TransportError {
    /// Wraps any error as a network failure.
    pub fn network(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Network {
            source: source.into(),
        }
    }

    /// The HTTP status, for [`TransportError::Status`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } => None,
        }
    }
}

/// Sends HTTP requests.
///
/// `method` and `url` are those of `descriptor`, passed separately for convenience.
/// Implementations must honor `descriptor.headers` and `descriptor.timeout`, and
/// report non-2xx answers as [`TransportError::Status`].
pub trait Transport: Send + Sync {
    /// Performs one exchange.
    fn dispatch(
        &self,
        method: &Method,
        url: &Url,
        descriptor: &CallDescriptor,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

impl<T> Transport for Arc<T>
where
    T: Transport,
{
    fn dispatch(
        &self,
        method: &Method,
        url: &Url,
        descriptor: &CallDescriptor,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        T::dispatch(self, method, url, descriptor)
    }
}
