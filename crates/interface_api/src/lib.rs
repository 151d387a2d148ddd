//! HTTP API Layer
//!
//! This crate provides the REST API for the account ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: One handler per ledger operation, plus health checks
//! - **Middleware**: Tracing and request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses mapped from `LedgerError`
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(ledger, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use domain_account::Ledger;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use crate::config::ApiConfig;
use crate::middleware::request_logging_middleware;
use crate::handlers::{accounts, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Ledger,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(ledger: Ledger, config: ApiConfig) -> Router {
    let state = AppState { ledger, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let account_routes = Router::new()
        .route("/", post(accounts::open_account))
        .route("/:id", get(accounts::get_account))
        .route("/:id/name", put(accounts::rename_account))
        .route("/:id/close", post(accounts::close_account))
        .route("/:id/deposit", post(accounts::deposit))
        .route("/:id/withdraw", post(accounts::withdraw));

    let api_routes = Router::new()
        .nest("/accounts", account_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
