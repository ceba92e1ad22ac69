//! # Homeroom To-Do Server
//!
//! Server-rendered personal to-do list with authentication and a completion
//! filter.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p homeroom-todo
//! ```

use homeroom_todo::{
    app::{build_router, AppState},
    config::Config,
};
use homeroom_shared::db::{migrations::run_migrations, pool::create_pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homeroom_todo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Homeroom To-Do Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(config.pool_config()).await?;
    run_migrations(&pool).await?;

    let addr = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
