//! League Admin Backend
//!
//! REST backend for the sports league admin console: users, matches,
//! schedules, scores and the grouped match board, persisted in SQLite.

mod api;
mod auth;
mod board;
mod cli;
mod config;
mod errors;
mod identity;
mod models;
mod panels;
mod render;
mod store;

use std::process::ExitCode;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use board::MatchBoard;
use cli::{Cli, Command};
use config::Config;
use identity::SessionCache;
use render::BoardRenderer;
use store::{DocumentStore, SqliteStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub board: MatchBoard,
    pub renderer: Arc<BoardRenderer>,
    pub session_cache: Arc<SessionCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Result<Self, errors::AppError> {
        Ok(Self {
            board: MatchBoard::new(store.clone()),
            renderer: Arc::new(BoardRenderer::new()?),
            session_cache: Arc::new(SessionCache::new(config.session_cache_path.clone())),
            config: Arc::new(config),
            store,
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match cli.command() {
        Command::Serve => serve(config).await,
        Command::UpdateVersion { version } => update_version(config, version).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting league admin backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Session cache path: {:?}", config.session_cache_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (LEAGUE_API_PSK). Authentication is disabled!");
    }

    let store: Arc<dyn DocumentStore> = Arc::new(SqliteStore::open(&config.db_path).await?);
    let bind_addr = config.bind_addr;
    let state = AppState::new(store, config)?;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn update_version(config: Config, version: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open(&config.db_path).await?;
    let published = panels::publish_version(&store, version).await?;
    tracing::info!(
        "Published app version {}",
        published.version.as_deref().unwrap_or(version)
    );
    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Session routes are open to any verified caller
    let session_routes = Router::new()
        .route("/session", get(api::check_session))
        .route("/session", delete(api::sign_out))
        .route("/session/cached", get(api::cached_session))
        .route("/session/setup-admin", post(api::setup_admin));

    // Admin-only API routes
    let admin_routes = Router::new()
        .route("/dashboard", get(api::get_dashboard))
        // Users
        .route("/users", get(api::list_users))
        .route("/users", post(api::create_user))
        .route("/users/{id}", get(api::get_user))
        .route("/users/{id}", put(api::update_user))
        .route("/users/{id}", delete(api::delete_user))
        // Matches
        .route("/matches", get(api::list_matches))
        .route("/matches", post(api::create_match))
        .route("/matches/options", get(api::match_options))
        .route("/matches/{id}", get(api::get_match))
        .route("/matches/{id}", put(api::update_match))
        .route("/matches/{id}", delete(api::delete_match))
        // Scores
        .route("/matches/{id}/scores", get(api::list_scores))
        .route("/matches/{id}/scores", post(api::add_score))
        .route("/matches/{id}/scores/{score_id}", put(api::update_score))
        .route("/matches/{id}/scores/{score_id}", delete(api::delete_score))
        // Schedules
        .route("/schedules", get(api::list_schedules))
        .route("/schedules", post(api::create_schedule))
        .route("/schedules/options", get(api::schedule_options))
        .route("/schedules/{id}", get(api::get_schedule))
        .route("/schedules/{id}", put(api::update_schedule))
        .route("/schedules/{id}", delete(api::delete_schedule))
        // Board and version
        .route("/board", get(api::get_board))
        .route("/version", get(api::get_version))
        .route("/version", put(api::update_version))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_gate,
        ));

    // Console pages
    let page_routes = Router::new()
        .route("/admin/board", get(api::render_board))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_gate,
        ));

    // PSK auth wraps everything except the health check
    let psk = state.config.api_psk.clone();
    let authenticated = Router::new()
        .nest("/api", session_routes.merge(admin_routes))
        .merge(page_routes)
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(authenticated)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
