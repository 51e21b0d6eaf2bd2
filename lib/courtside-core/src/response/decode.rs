use serde::de::DeserializeOwned;
use tracing::debug;

use super::ResponseType;

/// Response bodies quoted in errors are cut after this many characters.
pub(crate) const BODY_MAX_LENGTH: usize = 1024;

pub(crate) fn truncate_body(text: &str) -> String {
    match text.char_indices().nth(BODY_MAX_LENGTH) {
        Some((index, _)) => format!("{}... (truncated)", text.get(..index).unwrap_or(text)),
        None => text.to_string(),
    }
}

/// The response body could not be decoded per its declared type.
///
/// The HTTP exchange itself succeeded; only the interpretation of the body failed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum DecodeError {
    /// The body is not UTF-8 text.
    #[display("Response body is not valid UTF-8: {message}")]
    InvalidUtf8 {
        /// The UTF-8 error
        message: String,
    },

    /// The body is not the expected JSON.
    #[display("Failed to decode JSON at '{path}': {message}\n{body}")]
    Json {
        /// Where in the document decoding failed
        path: String,
        /// The JSON error
        message: String,
        /// The (possibly truncated) body
        body: String,
    },
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    /// A JSON document
    Json(serde_json::Value),
    /// JavaScript source with the JSON literal it embeds, when one could be extracted
    Script {
        /// The script text
        source: String,
        /// The embedded JSON payload
        payload: Option<serde_json::Value>,
    },
    /// Plain text (HTML, or an undeclared type)
    Text(String),
}

impl DecodedBody {
    /// The JSON value: the document itself, or a script's embedded payload.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Script { payload, .. } => payload.as_ref(),
            Self::Text(_) => None,
        }
    }

    /// The text of a script or text body.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Script { source, .. } => Some(source),
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }
}

/// Decodes a raw body according to the declared response type.
///
/// Implementations must be pure: the response caches the first result.
pub trait BodyDecoder: Send + Sync {
    /// Decodes `body`.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the body does not match the declared type.
    fn decode(&self, response_type: ResponseType, body: &[u8]) -> Result<DecodedBody, DecodeError>;
}

/// The default decoder.
///
/// - JSON: strict structured decode
/// - JS: best-effort extraction of the embedded JSON literal, the source is kept
/// - HTML and unspecified: raw text
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDecoder;

impl BodyDecoder for StandardDecoder {
    fn decode(&self, response_type: ResponseType, body: &[u8]) -> Result<DecodedBody, DecodeError> {
        match response_type {
            ResponseType::Json => decode_json(body).map(DecodedBody::Json),
            ResponseType::Js => {
                let source = decode_text(body)?;
                let payload = extract_payload(&source);
                Ok(DecodedBody::Script { source, payload })
            }
            ResponseType::Html | ResponseType::Unspecified => decode_text(body).map(DecodedBody::Text),
        }
    }
}

pub(crate) fn decode_text(body: &[u8]) -> Result<String, DecodeError> {
    String::from_utf8(body.to_vec()).map_err(|error| DecodeError::InvalidUtf8 {
        message: error.to_string(),
    })
}

/// Typed JSON decode, reporting the path of the failing element.
pub(crate) fn decode_json<T>(body: &[u8]) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
{
    let json_error = |path: String, error: &serde_json::Error| DecodeError::Json {
        path,
        message: error.to_string(),
        body: truncate_body(&String::from_utf8_lossy(body)),
    };

    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value: T = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|error| json_error(error.path().to_string(), error.inner()))?;
    deserializer
        .end()
        .map_err(|error| json_error(".".to_string(), &error))?;

    Ok(value)
}

/// Finds the outermost JSON object or array literal in a script.
fn extract_payload(source: &str) -> Option<serde_json::Value> {
    let start = source.find(['{', '['])?;
    let end = source.rfind(['}', ']'])?;
    if end < start {
        return None;
    }

    match serde_json::from_str(source.get(start..=end)?) {
        Ok(value) => Some(value),
        Err(error) => {
            debug!(%error, "no JSON payload in script");
            None
        }
    }
}
