/// Application state and router builder

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use homeroom_shared::auth::middleware::{session_auth, SessionState};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor; Arc keeps
/// the clone cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session token signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                     # Health check (public)
/// ├── /login, /register, /logout  # Credential entry points (public)
/// ├── /                           # Task list, ?filter= (session required)
/// ├── POST /add-task              # Add a task (form field item_text)
/// ├── /toggle-complete/:task_id   # Flip completion
/// └── /delete-task/:task_id       # Remove permanently
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/login",
            get(routes::auth::login_form).post(routes::auth::login),
        )
        .route(
            "/register",
            get(routes::auth::register_form).post(routes::auth::register),
        )
        .route("/logout", get(routes::auth::logout));

    let protected_routes = Router::new()
        .route("/", get(routes::tasks::index))
        .route("/add-task", post(routes::tasks::add_task))
        .route("/toggle-complete/:task_id", get(routes::tasks::toggle))
        .route("/delete-task/:task_id", get(routes::tasks::delete))
        .layer(axum::middleware::from_fn_with_state(
            SessionState::new(state.db.clone(), state.session_secret()),
            session_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
