// PUT /api/employees/:id handler
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::database::models::{Employee, EmployeePatch};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::{validation, AppState};

/// PUT /api/employees/:id - partial update of an active employee.
/// Fields absent from the body keep their stored values.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeePatch>, JsonRejection>,
) -> ApiResult<Employee> {
    let id = super::parse_id(&id)?;
    let Json(payload) = payload.map_err(|_| ApiError::bad_request("Invalid request format"))?;

    let patch = validation::sanitize_patch(payload);
    validation::validate_patch(&patch).map_err(ApiError::validation)?;

    let employee = state.store.update(id, &patch).await?;
    Ok(ApiResponse::success(employee))
}
