use std::time::Duration;

use http::header::{ACCEPT, HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use indexmap::IndexMap;
use tracing::trace;
use url::Url;

use super::{ApiRequest, ConstructionDefect};

/// Replaces every header of `target` that `source` defines (last write wins).
///
/// Multi-valued headers of `source` are copied with all their values.
pub(crate) fn merge_headers(target: &mut HeaderMap, source: &HeaderMap) {
    for name in source.keys() {
        target.remove(name);
        for value in source.get_all(name) {
            target.append(name.clone(), value.clone());
        }
    }
}

/// Per-call overrides, applied last when a call is assembled.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use courtside_core::CallOverrides;
/// use http::header::{ACCEPT, HeaderValue};
///
/// let overrides = CallOverrides::new()
///     .with_header(ACCEPT, HeaderValue::from_static("text/plain"))
///     .with_query("Season", "2017-18")
///     .with_timeout(Duration::from_secs(5));
///
/// assert!(!overrides.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallOverrides {
    headers: HeaderMap,
    query: IndexMap<String, String>,
    timeout: Option<Duration>,
    base_uri: Option<Url>,
}

impl CallOverrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Overrides (or adds) a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Overrides the timeout forwarded to the transport.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the family base URI.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: Url) -> Self {
        self.base_uri = Some(base_uri);
        self
    }

    /// Whether nothing is overridden.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
            && self.query.is_empty()
            && self.timeout.is_none()
            && self.base_uri.is_none()
    }
}

/// The fully merged, dispatch-ready description of one HTTP exchange.
///
/// `url` is absolute and already carries the encoded query string; `path` and
/// `query` are kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    /// The HTTP method
    pub method: Method,
    /// The absolute URL, query string included
    pub url: Url,
    /// The resolved path
    pub path: String,
    /// The merged headers
    pub headers: HeaderMap,
    /// The query parameters, in order, exactly as they appear in `url`
    pub query: Vec<(String, String)>,
    /// The timeout the transport should honor
    pub timeout: Option<Duration>,
}

impl CallDescriptor {
    /// Merges everything that contributes to a call, later sources winning:
    /// family config, request headers, the negotiated `Accept`, then `overrides`.
    ///
    /// Query parameters are the request's non-path fields in declaration order,
    /// followed by the override parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionDefect::InvalidUrl`] if the base URI and `path` do not
    /// form a valid URL.
    pub fn assemble(
        request: &ApiRequest<'_>,
        path: String,
        accept: Option<HeaderValue>,
        overrides: &CallOverrides,
    ) -> Result<Self, ConstructionDefect> {
        let family = request.definition().family();

        let mut headers = family.headers().clone();
        merge_headers(&mut headers, &request.headers());
        if let Some(accept) = accept {
            headers.insert(ACCEPT, accept);
        }
        merge_headers(&mut headers, &overrides.headers);

        let mut query = request.query_params();
        for (name, value) in &overrides.query {
            query.insert(name.clone(), value.clone());
        }

        let query: Vec<_> = query.into_iter().collect();
        let base_uri = overrides.base_uri.as_ref().unwrap_or(family.base_uri());
        let url = build_url(base_uri, &path, &query)?;
        let timeout = overrides.timeout.or(family.timeout());

        let descriptor = Self {
            method: request.method().clone(),
            url,
            path,
            headers,
            query,
            timeout,
        };
        trace!(?descriptor, "assembled");

        Ok(descriptor)
    }

    /// A descriptor for an already-formed URL, used by the raw escape hatch.
    ///
    /// Override query parameters are appended to those already in `url`, repeated
    /// keys included; the override base URI is ignored.
    pub fn raw(method: Method, mut url: Url, overrides: &CallOverrides) -> Self {
        if !overrides.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(overrides.query.iter());
        }
        let query = url.query_pairs().into_owned().collect();

        Self {
            method,
            path: url.path().to_string(),
            url,
            headers: overrides.headers.clone(),
            query,
            timeout: overrides.timeout,
        }
    }
}

fn build_url(
    base_uri: &Url,
    path: &str,
    query: &[(String, String)],
) -> Result<Url, ConstructionDefect> {
    let raw = format!(
        "{}/{}",
        base_uri.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = raw
        .parse::<Url>()
        .map_err(|error| ConstructionDefect::InvalidUrl { url: raw, error })?;

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    Ok(url)
}
