use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::TodoError;
use super::models::CreateTodoCommand;
use super::models::Pagination;
use super::models::Todo;
use super::models::TodoId;
use super::models::TodoPatch;
use super::ports::TodoRepository;
use super::ports::TodoServicePort;
use super::rules;
use crate::domain::account::models::AccountId;

/// Concrete implementation of TodoServicePort.
///
/// Generic over repository for testability.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    todo_repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(todo_repository: Arc<TR>) -> Self {
        Self { todo_repository }
    }

    async fn owned_todo(&self, owner: AccountId, id: TodoId) -> Result<Todo, TodoError> {
        let todo = self
            .todo_repository
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id))?;

        if todo.owner != owner {
            tracing::warn!(todo_id = %id, account_id = %owner, "Access to foreign todo denied");
            return Err(TodoError::Forbidden(id));
        }

        Ok(todo)
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository + 'static,
{
    async fn create_todo(
        &self,
        owner: AccountId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let now = Utc::now();
        let todo = Todo {
            id: TodoId::new(),
            owner,
            title: command.title,
            description: command.description,
            done: false,
            created_at: now,
            updated_at: now,
        };

        self.todo_repository.create(todo).await
    }

    async fn list_todos(
        &self,
        owner: AccountId,
        pagination: Pagination,
    ) -> Result<Vec<Todo>, TodoError> {
        self.todo_repository.list_by_owner(owner, pagination).await
    }

    async fn get_todo(&self, owner: AccountId, id: TodoId) -> Result<Todo, TodoError> {
        self.owned_todo(owner, id).await
    }

    async fn update_todo(
        &self,
        owner: AccountId,
        id: TodoId,
        patch: TodoPatch,
    ) -> Result<Todo, TodoError> {
        let todo = self.owned_todo(owner, id).await?;
        rules::validate_patch(&todo, &patch)?;

        self.todo_repository.update(id, patch).await
    }

    async fn delete_todo(&self, owner: AccountId, id: TodoId) -> Result<(), TodoError> {
        self.owned_todo(owner, id).await?;
        self.todo_repository.delete(id).await
    }
}
