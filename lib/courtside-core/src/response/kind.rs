use http::header::HeaderValue;

/// How a response body should be interpreted.
///
/// The type also drives content negotiation: [`ResponseType::accept_header`] is the
/// `Accept` value sent for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ResponseType {
    /// JSON document
    #[default]
    #[display("json")]
    Json,
    /// JavaScript source, usually wrapping a JSON payload
    #[display("js")]
    Js,
    /// HTML page
    #[display("html")]
    Html,
    /// No declared type: the transport's own `Accept` applies and the body stays text
    #[display("unspecified")]
    Unspecified,
}

impl ResponseType {
    /// The `Accept` header value for this type, `None` when no override applies.
    ///
    /// # Example
    ///
    /// ```rust
    /// use courtside_core::ResponseType;
    ///
    /// assert_eq!(
    ///     ResponseType::Js.accept_header().map(|value| value.to_str().unwrap().to_string()),
    ///     Some("application/javascript".to_string())
    /// );
    /// assert!(ResponseType::Unspecified.accept_header().is_none());
    /// ```
    pub fn accept_header(self) -> Option<HeaderValue> {
        let media_type = match self {
            Self::Json => mime::APPLICATION_JSON,
            Self::Js => mime::APPLICATION_JAVASCRIPT,
            Self::Html => mime::TEXT_HTML,
            Self::Unspecified => return None,
        };
        HeaderValue::from_str(media_type.as_ref()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accept(response_type: ResponseType) -> Option<String> {
        response_type
            .accept_header()
            .and_then(|value| value.to_str().ok().map(ToString::to_string))
    }

    #[test]
    fn should_negotiate_accept_header() {
        assert_eq!(accept(ResponseType::Json).as_deref(), Some("application/json"));
        assert_eq!(accept(ResponseType::Js).as_deref(), Some("application/javascript"));
        assert_eq!(accept(ResponseType::Html).as_deref(), Some("text/html"));
        assert_eq!(accept(ResponseType::Unspecified), None);
    }

    #[test]
    fn should_default_to_json() {
        assert_eq!(ResponseType::default(), ResponseType::Json);
    }
}
