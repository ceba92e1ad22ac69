/// One-shot flash messages
///
/// A flash message is a severity-tagged status string queued during one
/// request (usually just before a redirect) and shown on the next rendered
/// page. Messages ride in a cookie: JSON-encoded, Base64-wrapped so the
/// value stays cookie-safe. Rendering a page consumes the cookie.
///
/// Decoding is forgiving: a tampered or truncated cookie yields no messages
/// rather than an error, since flash content is purely cosmetic.
///
/// # Example
///
/// ```
/// use homeroom_shared::flash::{FlashLevel, FlashMessage, flash_cookie, messages_from_cookie};
///
/// let cookie = flash_cookie(&[FlashMessage::new(FlashLevel::Success, "Saved.")]);
/// let messages = messages_from_cookie(cookie.value());
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].message, "Saved.");
/// ```

use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use base64ct::{Base64UrlUnpadded, Encoding};
use cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

/// Name of the flash cookie
pub const FLASH_COOKIE: &str = "homeroom_flash";

/// Severity of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// Operation succeeded
    Success,

    /// Operation failed
    Error,

    /// Neutral information
    Info,

    /// Something worth attention, short of an error
    Warning,
}

impl FlashLevel {
    /// Lowercase name, used as a CSS class suffix in templates
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
            FlashLevel::Info => "info",
            FlashLevel::Warning => "warning",
        }
    }
}

/// A single flash message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashMessage {
    /// Severity tag
    pub level: FlashLevel,

    /// User-facing text
    pub message: String,
}

impl FlashMessage {
    /// Creates a flash message
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Builds a cookie carrying the given messages
pub fn flash_cookie(messages: &[FlashMessage]) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, encode(messages)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Builds a cookie that removes the flash cookie from the browser
pub fn clear_flash_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// Reads pending flash messages from a request's Cookie headers
///
/// Pages that render flashes should also send `clear_flash_cookie` so each
/// message is shown exactly once.
pub fn take(headers: &HeaderMap) -> Vec<FlashMessage> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| Cookie::split_parse(raw.to_owned()))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == FLASH_COOKIE)
        .map(|cookie| messages_from_cookie(cookie.value()))
        .unwrap_or_default()
}

/// Decodes a flash cookie value into messages
///
/// Undecodable input yields an empty list.
pub fn messages_from_cookie(value: &str) -> Vec<FlashMessage> {
    decode(value)
}

/// Builds a redirect response that queues a single flash message
///
/// This is the shape every user-facing failure (and most successes) takes:
/// redirect somewhere sensible and explain on arrival.
pub fn redirect_with_flash(location: &str, level: FlashLevel, message: &str) -> Response {
    let cookie = flash_cookie(&[FlashMessage::new(level, message)]);

    (
        [(header::SET_COOKIE, cookie.to_string())],
        Redirect::to(location),
    )
        .into_response()
}

fn encode(messages: &[FlashMessage]) -> String {
    // Serializing Vec<FlashMessage> cannot fail
    let json = serde_json::to_vec(messages).unwrap_or_default();
    Base64UrlUnpadded::encode_string(&json)
}

fn decode(value: &str) -> Vec<FlashMessage> {
    let Ok(json) = Base64UrlUnpadded::decode_vec(value) else {
        return Vec::new();
    };
    serde_json::from_slice(&json).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_encode_decode_roundtrip() {
        let messages = vec![
            FlashMessage::new(FlashLevel::Success, "Your score: 2/2"),
            FlashMessage::new(FlashLevel::Error, "Task title cannot be empty."),
        ];

        let decoded = decode(&encode(&messages));

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].level, FlashLevel::Success);
        assert_eq!(decoded[0].message, "Your score: 2/2");
        assert_eq!(decoded[1].level, FlashLevel::Error);
        assert_eq!(decoded[1].message, "Task title cannot be empty.");
    }

    #[test]
    fn test_decode_garbage_yields_no_messages() {
        assert!(decode("not base64 at all!!!").is_empty());
        assert!(decode("").is_empty());

        // Valid Base64, invalid JSON
        let bogus = Base64UrlUnpadded::encode_string(b"{\"oops\"");
        assert!(decode(&bogus).is_empty());
    }

    #[test]
    fn test_level_as_str() {
        assert_eq!(FlashLevel::Success.as_str(), "success");
        assert_eq!(FlashLevel::Error.as_str(), "error");
        assert_eq!(FlashLevel::Info.as_str(), "info");
        assert_eq!(FlashLevel::Warning.as_str(), "warning");
    }

    #[test]
    fn test_take_reads_from_headers() {
        let cookie = flash_cookie(&[FlashMessage::new(FlashLevel::Info, "hello")]);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("a=1; {}={}", FLASH_COOKIE, cookie.value())).unwrap(),
        );

        let messages = take(&headers);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "hello");
    }

    #[test]
    fn test_take_without_cookie_is_empty() {
        assert!(take(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_clear_flash_cookie_empties_value() {
        let cookie = clear_flash_cookie();
        assert_eq!(cookie.name(), FLASH_COOKIE);
        assert_eq!(cookie.value(), "");
    }
}
