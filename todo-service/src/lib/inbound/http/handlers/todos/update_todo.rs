use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::parse_todo_id;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoPatch;
use crate::domain::todo::models::TodoTitle;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TodoData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// HTTP request body for patching a todo (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

impl UpdateTodoRequest {
    fn try_into_patch(self) -> Result<TodoPatch, TodoError> {
        Ok(TodoPatch {
            title: self.title.map(TodoTitle::new).transpose()?,
            description: self.description.map(TodoDescription::new).transpose()?,
            done: self.done,
        })
    }
}

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedAccount>,
    Path(todo_id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let todo_id = parse_todo_id(&todo_id)?;
    let patch = req.try_into_patch()?;

    if patch.is_empty() {
        // Missing and foreign todos still answer 404 and 403.
        state
            .todo_service
            .get_todo(current.account.id, todo_id)
            .await?;
        return Err(ApiError::BadRequest("Nothing to update".to_string()));
    }

    state
        .todo_service
        .update_todo(current.account.id, todo_id, patch)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
