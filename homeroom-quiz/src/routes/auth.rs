/// Authentication pages and endpoints
///
/// # Endpoints
///
/// - `GET /login` / `POST /login` - Login form and submission
/// - `GET /register` / `POST /register` - Registration form and submission
/// - `GET /logout` - Clear the session and return to login
///
/// Successful login lands on /quiz; successful registration lands on /login
/// with a success flash. Login failures never say which part was wrong.

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    routes::render_page,
};
use askama::Template;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Form,
};
use homeroom_shared::{
    auth::{credentials, session, session::SessionClaims},
    flash::{self, FlashLevel, FlashMessage},
};
use serde::Deserialize;
use validator::Validate;

/// Login form template
#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    flashes: Vec<FlashMessage>,
}

/// Registration form template
#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    flashes: Vec<FlashMessage>,
}

/// Login form fields
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    /// Email address
    #[validate(email)]
    pub email: String,

    /// Password
    pub password: String,
}

/// Registration form fields
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Email address
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,

    /// Password (plaintext here, hashed before storage)
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
}

/// Renders the login form
pub async fn login_form(headers: HeaderMap) -> AppResult<Response> {
    let flashes = flash::take(&headers);
    let consume = !flashes.is_empty();
    render_page(LoginTemplate { flashes }, consume)
}

/// Handles a login submission
///
/// On success, sets the session cookie and redirects to /quiz. A malformed
/// email fails exactly like a wrong password: nothing in the response
/// distinguishes the cases.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if form.validate().is_err() {
        return Err(AppError::InvalidCredentials);
    }

    let user = credentials::authenticate(&state.db, &form.email, &form.password).await?;

    let token = session::issue_token(&SessionClaims::new(&user.uniquifier), state.session_secret())?;
    let cookie = session::session_cookie(token);

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Redirect::to("/quiz"),
    )
        .into_response())
}

/// Renders the registration form
pub async fn register_form(headers: HeaderMap) -> AppResult<Response> {
    let flashes = flash::take(&headers);
    let consume = !flashes.is_empty();
    render_page(RegisterTemplate { flashes }, consume)
}

/// Handles a registration submission
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    form.validate()
        .map_err(|e| AppError::Validation(validation_message(&e)))?;

    credentials::register(&state.db, &form.email, &form.password).await?;

    Ok(flash::redirect_with_flash(
        "/login",
        FlashLevel::Success,
        "Account created. Please log in.",
    ))
}

/// Clears the session cookie and returns to the login page
pub async fn logout() -> Response {
    let goodbye = flash::flash_cookie(&[FlashMessage::new(
        FlashLevel::Info,
        "You have been logged out.",
    )]);

    (
        AppendHeaders([
            (header::SET_COOKIE, session::clear_session_cookie().to_string()),
            (header::SET_COOKIE, goodbye.to_string()),
        ]),
        Redirect::to("/login"),
    )
        .into_response()
}

/// First user-facing message out of a validation failure
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field_errors| field_errors.iter())
        .filter_map(|error| error.message.as_ref())
        .map(|message| message.to_string())
        .next()
        .unwrap_or_else(|| "Validation failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_form_validation() {
        let valid = RegisterForm {
            email: "user@example.com".to_string(),
            password: "long enough password".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterForm {
            email: "not-an-email".to_string(),
            password: "long enough password".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterForm {
            email: "user@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_validation_message_picks_configured_message() {
        let form = RegisterForm {
            email: "user@example.com".to_string(),
            password: "short".to_string(),
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(
            validation_message(&errors),
            "Password must be at least 8 characters."
        );
    }
}
