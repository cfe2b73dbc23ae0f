//! Process-local repositories backed by `tokio::sync::RwLock` maps.
//!
//! Used by the test suites and by `storage.backend = "memory"`. State is lost
//! when the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountChanges;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::SessionStore;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Pagination;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoPatch;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::todo::rules;

/// Accounts keyed by id. Also serves as the session store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| &a.email == email)
            .cloned())
    }

    async fn update(
        &self,
        id: &AccountId,
        changes: AccountChanges,
    ) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if let Some(email) = &changes.email {
            if accounts.values().any(|a| &a.email == email && a.id != *id) {
                return Err(AccountError::EmailAlreadyExists(email.as_str().to_string()));
            }
        }

        let stored = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        if let Some(name) = changes.name {
            stored.name = name;
        }
        if let Some(email) = changes.email {
            stored.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            stored.password_hash = password_hash;
        }
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        self.accounts
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl SessionStore for InMemoryAccountRepository {
    async fn load_refresh_hash(&self, id: &AccountId) -> Result<Option<String>, AccountError> {
        self.accounts
            .read()
            .await
            .get(id)
            .map(|a| a.refresh_token_hash.clone())
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    async fn save_refresh_hash(
        &self,
        id: &AccountId,
        hash: Option<String>,
    ) -> Result<(), AccountError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        account.refresh_token_hash = hash;
        Ok(())
    }

    async fn swap_refresh_hash(
        &self,
        id: &AccountId,
        expected: &str,
        new: &str,
    ) -> Result<bool, AccountError> {
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.get_mut(id) else {
            return Ok(false);
        };

        if account.refresh_token_hash.as_deref() != Some(expected) {
            return Ok(false);
        }

        account.refresh_token_hash = Some(new.to_string());
        Ok(true)
    }
}

/// Todos keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<HashMap<TodoId, Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        self.todos.write().await.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        Ok(self.todos.read().await.get(&id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: AccountId,
        pagination: Pagination,
    ) -> Result<Vec<Todo>, TodoError> {
        let mut owned: Vec<Todo> = self
            .todos
            .read()
            .await
            .values()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(owned
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect())
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, TodoError> {
        let mut todos = self.todos.write().await;
        let stored = todos.get_mut(&id).ok_or(TodoError::NotFound(id))?;

        *stored = rules::apply_patch(stored, patch)?;
        Ok(stored.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<(), TodoError> {
        self.todos
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(TodoError::NotFound(id))
    }
}
