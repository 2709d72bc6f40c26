// DELETE /api/employees/:id handler
use axum::extract::{Path, State};

use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// DELETE /api/employees/:id - soft-delete an employee. The row is marked
/// with a deletion timestamp and disappears from every read path.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<bool> {
    let id = super::parse_id(&id)?;

    state.store.soft_delete(id).await?;
    Ok(ApiResponse::success(true))
}
