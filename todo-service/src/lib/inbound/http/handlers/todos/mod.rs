pub mod create_todo;
pub mod delete_todo;
pub mod get_todo;
pub mod list_todos;
pub mod update_todo;

pub use create_todo::create_todo;
pub use delete_todo::delete_todo;
pub use get_todo::get_todo;
pub use list_todos::list_todos;
pub use update_todo::update_todo;

use super::ApiError;
use crate::domain::todo::models::TodoId;

/// A malformed id can never name a stored todo.
fn parse_todo_id(raw: &str) -> Result<TodoId, ApiError> {
    TodoId::from_string(raw).map_err(|_| ApiError::NotFound(format!("Todo not found: {}", raw)))
}
