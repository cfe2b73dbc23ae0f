use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::todo::errors::MutationRule;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Pagination;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoPatch;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TodoRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    done: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TodoRow> for Todo {
    type Error = TodoError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        Ok(Todo {
            id: TodoId(row.id),
            owner: AccountId(row.owner_id),
            title: TodoTitle::new(row.title)?,
            description: TodoDescription::new(row.description)?,
            done: row.done,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, owner_id, title, description, done, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.owner.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(todo.done)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        Ok(todo)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, owner_id, title, description, done, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        row.map(Todo::try_from).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: AccountId,
        pagination: Pagination,
    ) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, owner_id, title, description, done, created_at, updated_at
            FROM todos
            WHERE owner_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner.0)
        .bind(i64::from(pagination.limit))
        .bind(i64::from(pagination.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, TodoError> {
        // $6 guards content edits on a done row that this patch does not reopen.
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                done = COALESCE($4, done),
                updated_at = $5
            WHERE id = $1 AND (done = FALSE OR NOT $6)
            RETURNING id, owner_id, title, description, done, created_at, updated_at
            "#,
        )
        .bind(id.0)
        .bind(patch.title.as_ref().map(TodoTitle::as_str))
        .bind(patch.description.as_ref().map(TodoDescription::as_str))
        .bind(patch.done)
        .bind(Utc::now())
        .bind(patch.needs_open_todo())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => Todo::try_from(row),
            None => match self.find_by_id(id).await? {
                Some(_) => Err(TodoError::InvalidMutation(MutationRule::DoneIsFrozen)),
                None => Err(TodoError::NotFound(id)),
            },
        }
    }

    async fn delete(&self, id: TodoId) -> Result<(), TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id));
        }

        Ok(())
    }
}
