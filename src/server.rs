// Server module - Builds the HTTP application router.
// Used by main.rs and by the integration tests.

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};

use crate::api;

/// Build the API router with database connection
pub fn build_router(db: DatabaseConnection) -> Router {
    let api_router = api::api_router(db);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().nest("/api", api_router).layer(cors)
}
