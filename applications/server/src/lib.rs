//! Headliner Server Library
//!
//! HTTP API over the Headliner league engine: player accounts, leagues,
//! rosters and the season calendar.
//!
//! This library exposes the router and state for the binary and for tests.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::CredentialService;
pub use state::AppState;

/// Build the full application router with `/api` routes, tracing and CORS
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", api::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
