// GET /api/employees handler
use axum::extract::State;

use crate::database::models::Employee;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// GET /api/employees - list active employees
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    let employees = state.store.list_active().await?;
    Ok(ApiResponse::success(employees))
}
