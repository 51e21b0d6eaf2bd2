use std::time::Duration;

use http::Method;
use tracing::debug;
use url::Url;

use super::{RawResponse, Transport, TransportError};
use crate::request::CallDescriptor;
use crate::response::truncate_body;

/// A [`Transport`] backed by a [`reqwest::Client`].
///
/// The descriptor timeout wins over the transport default; without either, the
/// client's own configuration applies.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use courtside_core::ReqwestTransport;
///
/// let transport = ReqwestTransport::new().with_default_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    default_timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// A transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport sharing an existing client (connection pool, proxy, TLS setup...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            default_timeout: None,
        }
    }

    /// Timeout used when the descriptor carries none.
    #[must_use]
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    async fn exchange(
        &self,
        method: &Method,
        url: &Url,
        descriptor: &CallDescriptor,
    ) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .headers(descriptor.headers.clone());
        if let Some(timeout) = descriptor.timeout.or(self.default_timeout) {
            builder = builder.timeout(timeout);
        }
        let request = builder.build().map_err(TransportError::network)?;

        debug!(?request, "sending...");
        let response = self
            .client
            .execute(request)
            .await
            .map_err(TransportError::network)?;
        debug!(?response, "...receiving");

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map(|text| truncate_body(&text))
                .unwrap_or_else(|error| format!("<unable to read response body: {error}>"));
            return Err(TransportError::Status { status, body });
        }

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(TransportError::network)?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

impl Transport for ReqwestTransport {
    fn dispatch(
        &self,
        method: &Method,
        url: &Url,
        descriptor: &CallDescriptor,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        self.exchange(method, url, descriptor)
    }
}
