use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountChanges;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::SessionStore;

const ACCOUNT_COLUMNS: &str =
    "id, name, email, password_hash, refresh_token_hash, created_at, updated_at";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    refresh_token_hash: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            name: DisplayName::new(row.name)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            refresh_token_hash: row.refresh_token_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, email: &str) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("accounts_email_key") {
            return AccountError::EmailAlreadyExists(email.to_string());
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, name, email, password_hash, refresh_token_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.id.0)
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(&account.refresh_token_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, account.email.as_str()))?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM accounts WHERE id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM accounts WHERE email = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn update(
        &self,
        id: &AccountId,
        changes: AccountChanges,
    ) -> Result<Account, AccountError> {
        let email = changes.email.as_ref().map(EmailAddress::as_str);
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE accounts
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = $5
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(id.0)
        .bind(changes.name.as_ref().map(DisplayName::as_str))
        .bind(email)
        .bind(changes.password_hash.as_deref())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, email.unwrap_or_default()))?;

        row.ok_or_else(|| AccountError::NotFound(id.to_string()))
            .and_then(Account::try_from)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl SessionStore for PostgresAccountRepository {
    async fn load_refresh_hash(&self, id: &AccountId) -> Result<Option<String>, AccountError> {
        sqlx::query_scalar::<_, Option<String>>(
            "SELECT refresh_token_hash FROM accounts WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    async fn save_refresh_hash(
        &self,
        id: &AccountId,
        hash: Option<String>,
    ) -> Result<(), AccountError> {
        let result = sqlx::query("UPDATE accounts SET refresh_token_hash = $2 WHERE id = $1")
            .bind(id.0)
            .bind(hash)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn swap_refresh_hash(
        &self,
        id: &AccountId,
        expected: &str,
        new: &str,
    ) -> Result<bool, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET refresh_token_hash = $3
            WHERE id = $1 AND refresh_token_hash = $2
            "#,
        )
        .bind(id.0)
        .bind(expected)
        .bind(new)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
