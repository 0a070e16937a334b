use std::sync::Arc;

use axum::{
    handler::Handler,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod validation;

use config::AppConfig;
use services::JokeClient;

/// Shared application state handed to every handler. Cheap to clone; the
/// config is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
    pub jokes: JokeClient,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Result<Self, reqwest::Error> {
        let jokes = JokeClient::new(&config.joke)?;
        Ok(Self {
            pool,
            config: Arc::new(config),
            jokes,
        })
    }
}

/// Build the full route table. The auth gate is layered onto each mutating
/// product handler individually; everything else is public.
pub fn app(state: AppState) -> Router {
    let auth_gate = from_fn_with_state(state.clone(), middleware::require_auth);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route(
            "/produkty",
            get(handlers::products::list)
                .post(handlers::products::create.layer(auth_gate.clone())),
        )
        .route(
            "/produkty/:id",
            put(handlers::products::update.layer(auth_gate.clone()))
                .delete(handlers::products::delete.layer(auth_gate)),
        )
        .route("/external/joke", get(handlers::joke::random_joke))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "API działa! (axum + SQLite)"
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
