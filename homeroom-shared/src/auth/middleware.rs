/// Session middleware for Axum
///
/// Gates protected route groups on a valid session cookie. The middleware
/// validates the token, resolves the user by the token's uniquifier subject,
/// and adds a `CurrentUser` to request extensions. Any failure redirects to
/// the login page rather than producing an error response.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use homeroom_shared::auth::middleware::{session_auth, CurrentUser, SessionState};
/// use sqlx::PgPool;
///
/// async fn protected_handler(Extension(user): Extension<CurrentUser>) -> String {
///     format!("Hello, {}!", user.email)
/// }
///
/// # fn example(pool: PgPool) {
/// let app: Router = Router::new()
///     .route("/", get(protected_handler))
///     .layer(middleware::from_fn_with_state(
///         SessionState::new(pool, "session-secret"),
///         session_auth,
///     ));
/// # }
/// ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use cookie::Cookie;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, error};
use uuid::Uuid;

use super::session::{self, SESSION_COOKIE};
use crate::models::user::User;

/// State required to validate a session: a pool to resolve the user and the
/// token signing secret
#[derive(Clone)]
pub struct SessionState {
    /// Database connection pool
    pub pool: PgPool,

    secret: String,
}

impl SessionState {
    /// Creates session middleware state
    pub fn new(pool: PgPool, secret: impl Into<String>) -> Self {
        Self {
            pool,
            secret: secret.into(),
        }
    }
}

/// The authenticated principal for the current request
///
/// Added to request extensions by `session_auth`; handlers extract it with
/// Axum's `Extension` extractor.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    /// The user's row id, used as the owner reference for quiz results and
    /// to-do items
    pub id: Uuid,

    /// The user's email address
    pub email: String,

    /// The uniquifier the session token named
    pub uniquifier: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            uniquifier: user.uniquifier.clone(),
        }
    }
}

/// Session authentication middleware
///
/// Reads the session cookie, validates the token, and resolves the user by
/// the token's uniquifier. The user must exist and be active.
///
/// On success the request proceeds with a `CurrentUser` extension. On any
/// failure (no cookie, bad token, unknown uniquifier, deactivated account)
/// the response is a redirect to `/login`; database failures also land there
/// after being logged, so one broken request never takes the process down.
pub async fn session_auth(
    State(state): State<SessionState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = session_token(req.headers()) else {
        debug!("No session cookie, redirecting to login");
        return Redirect::to("/login").into_response();
    };

    let claims = match session::validate_token(&token, &state.secret) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Session token rejected: {}", e);
            return Redirect::to("/login").into_response();
        }
    };

    let user = match User::find_by_uniquifier(&state.pool, &claims.sub).await {
        Ok(Some(user)) if user.active => user,
        Ok(_) => {
            debug!("Session names an unknown or inactive user");
            return Redirect::to("/login").into_response();
        }
        Err(e) => {
            error!("Failed to resolve session user: {}", e);
            return Redirect::to("/login").into_response();
        }
    };

    req.extensions_mut().insert(CurrentUser::from(&user));

    next.run(req).await
}

/// Extracts the session token from the request's Cookie headers
fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| Cookie::split_parse(raw.to_owned()))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_token_found_among_other_cookies() {
        let headers = headers_with_cookie("a=1; homeroom_session=the-token; b=2");
        assert_eq!(session_token(&headers), Some("the-token".to_string()));
    }

    #[test]
    fn test_session_token_missing() {
        let headers = headers_with_cookie("a=1; b=2");
        assert_eq!(session_token(&headers), None);

        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_token_across_multiple_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("homeroom_session=tok"),
        );

        assert_eq!(session_token(&headers), Some("tok".to_string()));
    }

    #[test]
    fn test_current_user_from_user() {
        let user = User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: "hash".to_string(),
            active: true,
            confirmed_at: None,
            uniquifier: "uniq".to_string(),
            created_at: chrono::Utc::now(),
        };

        let current = CurrentUser::from(&user);
        assert_eq!(current.id, user.id);
        assert_eq!(current.email, "user@example.com");
        assert_eq!(current.uniquifier, "uniq");
    }
}
