use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_todo_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::SuccessData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedAccount>,
    Path(todo_id): Path<String>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    let todo_id = parse_todo_id(&todo_id)?;

    state
        .todo_service
        .delete_todo(current.account.id, todo_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, SuccessData::ok()))
}
