use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::todo::errors::TodoTextError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoTitle;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TodoData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedAccount>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let command = body
        .try_into_command()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .todo_service
        .create_todo(current.account.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::CREATED, todo.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    title: String,
    description: String,
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, TodoTextError> {
        Ok(CreateTodoCommand {
            title: TodoTitle::new(self.title)?,
            description: TodoDescription::new(self.description)?,
        })
    }
}
