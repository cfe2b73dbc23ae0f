use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Pagination;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TodoData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct ListTodosQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListTodosResponseData {
    pub items: Vec<TodoData>,
    pub pagination: PaginationData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationData {
    pub limit: u32,
    pub offset: u32,
    pub count: usize,
}

pub async fn list_todos(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedAccount>,
    query: Result<Query<ListTodosQuery>, QueryRejection>,
) -> Result<ApiSuccess<ListTodosResponseData>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::UnprocessableEntity(e.body_text()))?;
    let pagination = Pagination::new(query.limit, query.offset).map_err(TodoError::from)?;

    let todos = state
        .todo_service
        .list_todos(current.account.id, pagination)
        .await?;

    let items: Vec<TodoData> = todos.iter().map(|t| t.into()).collect();
    let count = items.len();

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListTodosResponseData {
            items,
            pagination: PaginationData {
                limit: pagination.limit,
                offset: pagination.offset,
                count,
            },
        },
    ))
}
