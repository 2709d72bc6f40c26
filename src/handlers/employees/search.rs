// GET /api/employees/search handler
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::database::models::Employee;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::{validation, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/employees/search?q=term - case-insensitive contains search over
/// name, email and position
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<Employee>> {
    let term = validation::sanitize_search_term(query.q.as_deref().unwrap_or(""));
    if term.is_empty() {
        return Err(ApiError::bad_request("Search query is required"));
    }

    let employees = state.store.search(&term).await?;
    Ok(ApiResponse::success(employees))
}
