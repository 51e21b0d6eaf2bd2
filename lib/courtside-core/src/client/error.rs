use crate::request::ConstructionDefect;
use crate::response::DecodeError;
use crate::transport::TransportError;
use crate::validation::Violations;

/// Errors returned by the [`ApiClient`](super::ApiClient).
///
/// There are exactly four kinds of failure, each reported before or instead of the
/// following stages:
///
/// 1. the request values are invalid ([`ApiClientError::Validation`])
/// 2. the request cannot be turned into a call ([`ApiClientError::Construction`])
/// 3. the exchange failed ([`ApiClientError::Transport`])
/// 4. the body does not match its declared type ([`ApiClientError::Decode`])
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiClientError {
    /// One or more field constraints failed; nothing was sent.
    #[display("Invalid request '{request}':\n{violations}")]
    #[from(skip)]
    Validation {
        /// The request definition name
        request: &'static str,
        /// Every failed constraint, in order
        violations: Violations,
    },

    /// The definition and the request values do not fit together; nothing was sent.
    ///
    /// This is a programming error in the catalog or in the caller.
    #[display("Cannot build request: {_0}")]
    Construction(ConstructionDefect),

    /// The HTTP exchange failed.
    #[display("Request '{request}' to {endpoint} failed: {source}")]
    #[from(skip)]
    Transport {
        /// The request definition name (`raw` for the escape hatch)
        request: &'static str,
        /// The endpoint that was called
        endpoint: String,
        /// The transport failure
        source: TransportError,
    },

    /// The response body could not be decoded.
    ///
    /// The client returns the raw [`ApiResponse`](crate::ApiResponse) and decodes
    /// nothing itself; the [`DecodeError`] of its accessors converts into this
    /// variant with `?`, so `send` and decoding share one error type.
    #[display("Cannot decode response: {_0}")]
    Decode(DecodeError),
}

impl ApiClientError {
    /// The violations, for [`ApiClientError::Validation`].
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Validation { violations, .. } => Some(violations),
            _ => None,
        }
    }
}
