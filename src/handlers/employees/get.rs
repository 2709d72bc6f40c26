// GET /api/employees/:id handler
use axum::extract::{Path, State};

use crate::database::models::Employee;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// GET /api/employees/:id - fetch a single active employee
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Employee> {
    let id = super::parse_id(&id)?;

    let employee = state.store.get_active(id).await?;
    Ok(ApiResponse::success(employee))
}
