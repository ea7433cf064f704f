//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let clients = Router::new()
        .route(
            "/",
            get(handlers::list_clients).post(handlers::create_client),
        )
        // Clients reach the income filter with and without the trailing
        // slash; axum treats those as distinct paths.
        .route("/income", get(handlers::get_clients_by_income))
        .route("/income/", get(handlers::get_clients_by_income))
        .route("/cpf/{cpf}", get(handlers::get_client_by_cpf))
        .route(
            "/{id}",
            get(handlers::get_client_by_id)
                .put(handlers::update_client)
                .delete(handlers::delete_client),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/clients", clients)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
