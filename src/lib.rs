use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod security;
pub mod validation;

use config::SecurityConfig;
use database::store::EmployeeStore;

/// Shared handler state. The store adapter is constructed once at startup
/// and injected into every handler, so tests can swap in a double.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
}

/// Builds the application router with CORS and request tracing applied.
pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(employee_routes())
        .layer(middleware::cors_layer(security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn employee_routes() -> Router<AppState> {
    use handlers::employees;

    Router::new()
        .route("/api/employees", get(employees::list).post(employees::create))
        .route("/api/employees/search", get(employees::search))
        .route(
            "/api/employees/:id",
            get(employees::get_by_id)
                .put(employees::update)
                .delete(employees::delete),
        )
}
