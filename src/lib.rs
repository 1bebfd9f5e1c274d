pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod schemas;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use config::Config;
use db::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
}

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::meta::root))
        .route("/health", get(handlers::meta::health))
        .route("/config", get(handlers::meta::client_config))
        .route(
            "/todos",
            get(handlers::api::list_all_todos).post(handlers::api::create_new_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::api::get_single_todo)
                .put(handlers::api::update_existing_todo)
                .delete(handlers::api::delete_existing_todo),
        )
        .fallback(handlers::api::no_route)
        .method_not_allowed_fallback(handlers::api::method_not_allowed)
        .layer(
            tower::ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(cors)
                .layer(tower_http::compression::CompressionLayer::new()),
        )
        .with_state(state)
}

/// Credentials are allowed, so methods and headers are mirrored from the
/// preflight request instead of answered with a wildcard.
fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_origins.iter().cloned()))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
