// One file per operation, mirroring the route table.
mod create;
mod delete;
mod get;
mod list;
mod search;
mod update;

pub use create::create;
pub use delete::delete;
pub use get::get_by_id;
pub use list::list;
pub use search::search;
pub use update::update;

use crate::error::ApiError;

/// Employee ids are positive integers; anything else is a client error.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request("Invalid employee ID")),
    }
}
