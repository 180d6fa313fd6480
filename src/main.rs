//! Sitesmith Backend
//!
//! A REST backend for a multi-brand landing-page builder. Each platform owns
//! one document holding every brand's versioned page templates; editors save
//! sections into a version and the live endpoint renders whichever version a
//! brand has made active.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod render;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{DocumentStore, TemplateRepository, UserDirectory};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<TemplateRepository>,
    pub users: Arc<UserDirectory>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Sitesmith Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Assets path: {:?}", config.assets_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the operator key is not configured
    if config.operator_key.is_none() {
        tracing::warn!(
            "No operator key configured (SITESMITH_OPERATOR_KEY). Authentication is disabled!"
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let store = DocumentStore::new(pool);
    let repo = Arc::new(TemplateRepository::new(store.clone()));
    let users = Arc::new(UserDirectory::new(store));

    // Create application state
    let state = AppState {
        repo,
        users,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the key for the auth layer
    let operator_key = state.config.operator_key.clone();

    // Operator routes (key required)
    let operator_routes = Router::new()
        // Brands
        .route("/platforms/{platform}/brands", get(api::list_brands))
        .route("/platforms/{platform}/brands", post(api::register_brand))
        .route("/platforms/{platform}/brands/{brand}", get(api::get_brand))
        // Versions
        .route(
            "/platforms/{platform}/brands/{brand}/versions",
            get(api::list_versions),
        )
        .route(
            "/platforms/{platform}/brands/{brand}/versions",
            post(api::register_version),
        )
        .route(
            "/platforms/{platform}/brands/{brand}/versions/{version}",
            delete(api::delete_version),
        )
        .route(
            "/platforms/{platform}/brands/{brand}/active-version",
            put(api::set_active_version),
        )
        // Sections
        .route(
            "/platforms/{platform}/brands/{brand}/versions/{version}/sections/{section}",
            get(api::load_section),
        )
        .route(
            "/platforms/{platform}/brands/{brand}/versions/{version}/sections/{section}",
            put(api::save_section),
        )
        // Preview
        .route(
            "/preview/{platform}/{brand}/{version}",
            get(api::render_preview),
        )
        // Users
        .route("/users", post(api::register_user))
        .route("/users/{email}", get(api::get_user))
        // Assets
        .route("/assets/{platform}/{kind}", post(api::upload_asset))
        // Apply operator auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::operator_auth_layer(operator_key.clone(), req, next)
        }));

    // Public routes (what a visitor's browser hits)
    let public_routes = Router::new()
        .route("/live/{platform}/{brand}", get(api::render_live))
        .route("/assets/{platform}/{kind}/{asset}", get(api::fetch_asset));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", operator_routes.merge(public_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
