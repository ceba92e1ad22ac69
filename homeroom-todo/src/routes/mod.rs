/// Route handlers for the to-do server
///
/// - `health`: Health check endpoint
/// - `auth`: Login, registration, logout
/// - `tasks`: Task list, add, toggle, delete

pub mod auth;
pub mod health;
pub mod tasks;

use crate::error::AppResult;
use askama::Template;
use axum::{
    http::header,
    response::{Html, IntoResponse, Response},
};
use homeroom_shared::flash;

/// Renders a page template, consuming any flash messages it displays
pub(crate) fn render_page<T: Template>(template: T, consume_flashes: bool) -> AppResult<Response> {
    let html = Html(template.render()?);

    if consume_flashes {
        Ok((
            [(header::SET_COOKIE, flash::clear_flash_cookie().to_string())],
            html,
        )
            .into_response())
    } else {
        Ok(html.into_response())
    }
}
