// POST /api/employees handler
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::database::models::{Employee, NewEmployee};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::{security, validation, AppState};

/// POST /api/employees - create an employee record
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> ApiResult<Employee> {
    let Json(payload) = payload.map_err(|_| ApiError::bad_request("Invalid request format"))?;

    let input = validation::sanitize_new(payload);
    validation::validate_new(&input).map_err(ApiError::validation)?;

    // The name stands in for a password here; only its hash is stored.
    let password_hash = security::hash_credential(&input.name)?;

    let employee = state.store.create(&input, &password_hash).await?;
    Ok(ApiResponse::created(employee))
}
