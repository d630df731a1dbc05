//! HTTP server implementation for the Shareloop API

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::core::{AppState, Result};

/// Creates the main application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    // Multipart item creation carries the image payloads
    let body_limit = DefaultBodyLimit::max(state.config.max_request_body_bytes());

    // Build the complete router with all routes
    Router::new()
        // Item routes
        .route(
            "/api/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/api/items/:id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        // Request routes
        .route(
            "/api/requests",
            get(handlers::list_requests).post(handlers::create_request),
        )
        .route("/api/requests/:id", get(handlers::get_request))
        .route("/api/requests/:id/matches", get(handlers::request_matches))
        // Transaction routes
        .route("/api/transactions", axum::routing::post(handlers::create_transaction))
        .route(
            "/api/transactions/user/:userId",
            get(handlers::list_user_transactions),
        )
        // User routes
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route("/api/users/:id", get(handlers::get_user))
        // Community routes
        .route("/api/impact", get(handlers::get_impact))
        .route("/api/categories", get(handlers::list_categories))
        // System routes
        .route("/api/health", get(handlers::health_check))
        .route("/metrics", get(handlers::get_metrics))
        // Apply middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(body_limit),
        )
        // Add application context as shared state
        .with_state(state)
}

/// Start the HTTP server and run it until `shutdown` resolves
pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    tracing::info!("Starting Shareloop API server on {}", addr);

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check available at http://{}/api/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
