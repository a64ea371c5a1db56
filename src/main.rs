//! Bhansa backend server.
//!
//! REST API for a Nepali food discovery catalog: restaurants, dishes, menus,
//! votes, search and rankings. Public read routes live under `/api`; the
//! mutating admin surface under `/api/admin` behind a pre-shared key.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod search;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::db::Repository;
use crate::search::SearchService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub search: Arc<SearchService>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    tracing::info!(db_path = %config.db_path.display(), "Initializing database");
    let pool = db::init_database(&config.db_path).await?;

    let repo = Arc::new(Repository::new(pool));
    let state = AppState {
        search: Arc::new(SearchService::new(repo.clone())),
        repo,
        config: Arc::new(config),
    };

    if state.config.api_psk.is_none() {
        tracing::warn!("BHANSA_API_PSK is not set; admin routes are unprotected");
    }

    let bind_addr = state.config.bind_addr;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let psk = state.config.api_psk.clone();

    let admin_routes = Router::new()
        .route("/restaurants", post(api::restaurants::create_restaurant))
        .route(
            "/restaurants/{id}",
            put(api::restaurants::update_restaurant).delete(api::restaurants::delete_restaurant),
        )
        .route("/foods", post(api::foods::create_food))
        .route(
            "/foods/{id}",
            put(api::foods::update_food).delete(api::foods::delete_food),
        )
        .route("/menu", post(api::foods::create_menu_link))
        .route("/menu/{id}", delete(api::foods::delete_menu_link))
        .route(
            "/features",
            get(api::vloggers::list_features).post(api::vloggers::create_feature),
        )
        .route(
            "/features/{id}",
            put(api::vloggers::update_feature).delete(api::vloggers::delete_feature),
        )
        .layer(middleware::from_fn(move |request, next| {
            auth::psk_auth_layer(psk.clone(), request, next)
        }));

    let public_routes = Router::new()
        .route("/search", get(api::search::search))
        .route("/surprise", get(api::search::surprise))
        .route("/restaurants", get(api::restaurants::list_restaurants))
        .route("/restaurants/top", get(api::restaurants::top_restaurants))
        .route("/restaurants/{id}", get(api::restaurants::get_restaurant))
        .route("/restaurants/{id}/menu", get(api::restaurants::restaurant_menu))
        .route(
            "/restaurants/{id}/features",
            get(api::restaurants::restaurant_features),
        )
        .route(
            "/restaurants/{id}/votes",
            get(api::restaurants::restaurant_votes).post(api::restaurants::vote_restaurant),
        )
        .route("/foods", get(api::foods::list_foods))
        .route("/foods/top", get(api::foods::top_foods))
        .route("/foods/{id}", get(api::foods::get_food))
        .route("/foods/{id}/variations", get(api::foods::food_variations))
        .route("/foods/{id}/restaurants", get(api::foods::food_restaurants))
        .route(
            "/foods/{id}/votes",
            get(api::foods::food_votes).post(api::foods::vote_food),
        )
        .route("/stats", get(api::stats::stats));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", public_routes)
        .nest("/api/admin", admin_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
