/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use homeroom_quiz::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::get,
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
/// ├── /health              # Health check (public)
/// ├── /login, /register    # Credential entry points (public)
/// ├── /logout              # Clears the session cookie (public)
/// ├── /                    # Landing page (session required)
/// ├── /quiz                # GET question form, POST score + persist
/// ├── /results             # Requester's own history
/// └── /leaderboard         # Global top 10
/// ```
///
/// Protected routes are gated by the shared session middleware, which
/// redirects to /login rather than erroring when no valid session is
/// present.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: health plus the credential entry points
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

    // Everything else requires a session
    let protected_routes = Router::new()
        .route("/", get(routes::quiz::index))
        .route(
            "/quiz",
            get(routes::quiz::quiz_form).post(routes::quiz::submit),
        )
        .route("/results", get(routes::quiz::results))
        .route("/leaderboard", get(routes::quiz::leaderboard))
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
