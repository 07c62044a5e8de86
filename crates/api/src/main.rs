//! Syntax & Sips API Server

use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod auth;
mod error;
mod pagination;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("syntax_sips=debug".parse()?)
                .add_directive("api=debug".parse()?),
        )
        .init();

    info!("☕ Starting Syntax & Sips API");

    // Load configuration
    let config = common::Config::from_env();

    // Connect to database
    let pool = db::create_pool(&config.database_url).await?;

    // Run migrations
    db::run_migrations(&pool).await?;

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), pool));

    // Make sure the avatar bucket exists; the API still serves without it
    if let Err(e) = state
        .platform
        .create_bucket(&config.avatar_bucket, true)
        .await
    {
        warn!("Could not ensure avatar bucket: {}", e);
    }

    // Build API router with state
    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/actions", post(routes::actions::record))
        .route("/api/profiles/me", get(routes::profiles::me))
        .route(
            "/api/profiles/me/settings",
            patch(routes::profiles::update_settings),
        )
        .route(
            "/api/profiles/me/avatar",
            post(routes::profiles::upload_avatar),
        )
        .route("/api/profiles/:username", get(routes::profiles::get))
        .route(
            "/api/profiles/:username/badges",
            get(routes::profiles::badges),
        )
        .route(
            "/api/profiles/:username/challenges",
            get(routes::profiles::challenges),
        )
        .route(
            "/api/profiles/:username/activity",
            get(routes::profiles::activity),
        )
        .route("/api/badges", get(routes::badges::catalog))
        .route("/api/challenges", get(routes::challenges::list))
        .route("/api/leaderboard", get(routes::leaderboard::global))
        .route(
            "/api/library/bookmarks",
            get(routes::bookmarks::list).post(routes::bookmarks::create),
        )
        .route(
            "/api/library/bookmarks/:id",
            delete(routes::bookmarks::remove),
        )
        .route(
            "/api/library/highlights",
            get(routes::highlights::list).post(routes::highlights::create),
        )
        .route(
            "/api/library/highlights/:id",
            delete(routes::highlights::remove),
        )
        .route(
            "/api/library/history",
            get(routes::history::list)
                .put(routes::history::upsert)
                .delete(routes::history::clear),
        )
        .route(
            "/api/library/lists",
            get(routes::lists::list).post(routes::lists::create),
        )
        .route(
            "/api/library/lists/:id",
            get(routes::lists::get)
                .patch(routes::lists::update)
                .delete(routes::lists::remove),
        )
        .route(
            "/api/library/lists/:id/items",
            get(routes::lists::items).post(routes::lists::add_item),
        )
        .route(
            "/api/library/lists/:id/items/:item_id",
            delete(routes::lists::remove_item),
        )
        .route("/api/newsletter", post(routes::newsletter::subscribe))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("🚀 Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
