mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};

use axum::{
    routing::{get, patch},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::db::Database;
use crate::ledger::Ledger;

/// Router with permissive CORS.
pub fn create_router(db: Database) -> Router {
    create_router_with_config(db, &ServerConfig::default())
}

pub fn create_router_with_config(db: Database, config: &ServerConfig) -> Router {
    let api = Router::new()
        // Roommates
        .route(
            "/roommates",
            get(handlers::list_roommates).post(handlers::create_roommate),
        )
        // Bills
        .route("/bills", get(handlers::list_bills).post(handlers::create_bill))
        // Chores
        .route("/chores", get(handlers::list_chores).post(handlers::create_chore))
        .route("/chores/{id}/done", patch(handlers::complete_chore))
        // Dashboard
        .route("/dashboard/upcoming", get(handlers::get_upcoming))
        .route("/tracker/summary", get(handlers::get_tracker_summary))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(config.cors_layer()),
        )
        .with_state(Ledger::new(db))
}
