//! dermscore-api
//!
//! HTTP surface for the scoring service: the three callable operations,
//! read-only template routes, caller identification, and the daily
//! aggregation scheduler.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod scheduler;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub use config::ApiConfig;
pub use state::AppState;

/// Build the router with every route and middleware layer applied.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Public, read-only
        .route("/health", get(routes::health::health_check))
        .route("/templates", get(routes::templates::list_templates))
        .route("/templates/{slug}", get(routes::templates::get_template))
        // Callable operations; the caller is resolved by `identify_caller`
        .route("/calculateScore", post(routes::score::calculate_score))
        .route(
            "/generateResultExport",
            post(routes::export::generate_result_export),
        )
        .route(
            "/submitToolResult",
            post(routes::tool_result::submit_tool_result),
        )
        // The last layer added runs first, so callers are identified before auditing.
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::identify_caller,
        ))
        .layer(cors)
        .with_state(state)
}
