/// Session token generation and validation
///
/// A session is an HS256-signed token carried in an HttpOnly cookie. The
/// token's subject is the user's *uniquifier*, not their row id: the
/// middleware resolves the user from it on every request, so deactivating an
/// account or rotating its uniquifier cuts off existing sessions without any
/// server-side session store.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 7 days
/// - **Validation**: Signature, expiration, not-before, and issuer checks
/// - **Secret Management**: Secrets must be at least 32 bytes
///
/// # Example
///
/// ```
/// use homeroom_shared::auth::session::{issue_token, validate_token, SessionClaims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = SessionClaims::new("some-uniquifier");
/// let token = issue_token(&claims, "a-secret-key-of-sufficient-length")?;
///
/// let validated = validate_token(&token, "a-secret-key-of-sufficient-length")?;
/// assert_eq!(validated.sub, "some-uniquifier");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "homeroom_session";

/// Issuer claim stamped into every session token
const ISSUER: &str = "homeroom";

/// How long a session stays valid
const SESSION_LIFETIME_DAYS: i64 = 7;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate session token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Session token has expired")]
    Expired,

    /// Token was issued by someone else
    #[error("Invalid session token issuer")]
    InvalidIssuer,
}

/// Session token claims
///
/// Standard JWT claims only; the subject is the user's uniquifier string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - the user's uniquifier
    pub sub: String,

    /// Issuer - always "homeroom"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl SessionClaims {
    /// Creates claims for a user with the default 7-day expiration
    pub fn new(uniquifier: &str) -> Self {
        Self::with_expiration(uniquifier, Duration::days(SESSION_LIFETIME_DAYS))
    }

    /// Creates claims with a custom expiration
    pub fn with_expiration(uniquifier: &str, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: uniquifier.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed session token from claims
///
/// # Errors
///
/// Returns `SessionError::CreateError` if signing fails
pub fn issue_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| SessionError::CreateError(e.to_string()))
}

/// Validates a session token and returns its claims
///
/// Checks the signature, expiration, not-before, and issuer.
///
/// # Errors
///
/// - `SessionError::Expired` when the token is past its expiration
/// - `SessionError::InvalidIssuer` when the issuer claim is wrong
/// - `SessionError::ValidationError` for any other failure (bad signature,
///   malformed token, ...)
pub fn validate_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_nbf = true;

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => SessionError::InvalidIssuer,
        _ => SessionError::ValidationError(e.to_string()),
    })?;

    Ok(data.claims)
}

/// Builds the session cookie carrying a freshly issued token
///
/// HttpOnly and SameSite=Lax; no Max-Age, so the cookie lives until the
/// browser session ends or the token inside it expires.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Builds a cookie that removes the session cookie from the browser
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_token_roundtrip() {
        let claims = SessionClaims::new("the-uniquifier");
        let token = issue_token(&claims, SECRET).expect("Token creation should succeed");

        let validated = validate_token(&token, SECRET).expect("Validation should succeed");
        assert_eq!(validated.sub, "the-uniquifier");
        assert_eq!(validated.iss, "homeroom");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = SessionClaims::new("the-uniquifier");
        let token = issue_token(&claims, SECRET).expect("Token creation should succeed");

        let result = validate_token(&token, "another-secret-key-also-32-bytes-long");
        assert!(matches!(result, Err(SessionError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Well past the default 60s validation leeway
        let claims = SessionClaims::with_expiration("the-uniquifier", Duration::hours(-2));
        let token = issue_token(&claims, SECRET).expect("Token creation should succeed");

        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(SessionError::Expired)));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let mut claims = SessionClaims::new("the-uniquifier");
        claims.iss = "someone-else".to_string();
        let token = issue_token(&claims, SECRET).expect("Token creation should succeed");

        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(SessionError::InvalidIssuer)));
    }

    #[test]
    fn test_is_expired() {
        let live = SessionClaims::new("u");
        assert!(!live.is_expired());

        let dead = SessionClaims::with_expiration("u", Duration::seconds(-1));
        assert!(dead.is_expired());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("token-value".to_string());

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_clear_session_cookie_empties_value() {
        let cookie = clear_session_cookie();

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
    }
}
