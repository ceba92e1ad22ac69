/// Authentication for the Homeroom applications
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Session tokens (HS256) and the session cookie
/// - [`credentials`]: Registration and login flows
/// - [`middleware`]: Axum middleware gating protected routes on a valid session
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: HS256-signed, carried in an HttpOnly cookie,
///   subject = the user's uniquifier rather than their row id
/// - **Constant-time Comparison**: Password verification uses constant-time
///   operations
///
/// # Example
///
/// ```no_run
/// use homeroom_shared::auth::password::{hash_password, verify_password};
/// use homeroom_shared::auth::session::{issue_token, validate_token, SessionClaims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = SessionClaims::new("some-uniquifier");
/// let token = issue_token(&claims, "secret-key")?;
/// let validated = validate_token(&token, "secret-key")?;
/// assert_eq!(validated.sub, "some-uniquifier");
/// # Ok(())
/// # }
/// ```

pub mod credentials;
pub mod middleware;
pub mod password;
pub mod session;
