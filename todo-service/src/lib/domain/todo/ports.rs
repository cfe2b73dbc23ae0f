use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Pagination;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoPatch;

/// Port for todo domain service operations.
///
/// Every operation is scoped to `owner`; touching another account's todo
/// fails with `Forbidden`.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// Create a new todo, not done.
    async fn create_todo(
        &self,
        owner: AccountId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// List the owner's todos, newest first.
    async fn list_todos(
        &self,
        owner: AccountId,
        pagination: Pagination,
    ) -> Result<Vec<Todo>, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Todo belongs to another account
    async fn get_todo(&self, owner: AccountId, id: TodoId) -> Result<Todo, TodoError>;

    /// Apply a patch after checking the done-state rules.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Todo belongs to another account
    /// * `InvalidMutation` - Patch edits a done todo without unmarking it
    async fn update_todo(
        &self,
        owner: AccountId,
        id: TodoId,
        patch: TodoPatch,
    ) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Todo belongs to another account
    async fn delete_todo(&self, owner: AccountId, id: TodoId) -> Result<(), TodoError>;
}

/// Repository port for todo persistence operations.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoError>;

    async fn list_by_owner(
        &self,
        owner: AccountId,
        pagination: Pagination,
    ) -> Result<Vec<Todo>, TodoError>;

    /// Write the fields set in `patch` and bump `updated_at`, in one step.
    ///
    /// The done-state rule is checked against the row being written, so an
    /// edit that raced a concurrent "mark done" is refused rather than applied.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `InvalidMutation` - Stored todo is done and the patch edits it without unmarking
    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist
    async fn delete(&self, id: TodoId) -> Result<(), TodoError>;
}
