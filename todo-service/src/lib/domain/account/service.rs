use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialIssuer;
use auth::RefreshScope;
use auth::RefreshVerification;
use auth::SecretHasher;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountChanges;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthenticatedSession;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::SessionCredentials;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::SessionStore;

/// Domain service implementation for accounts and their sessions.
///
/// Owns the session lifecycle: issuing a credential pair on registration and
/// login, rotating it on refresh, and clearing it on logout.
pub struct AccountService<AR, SS>
where
    AR: AccountRepository,
    SS: SessionStore,
{
    repository: Arc<AR>,
    sessions: Arc<SS>,
    issuer: Arc<CredentialIssuer>,
    hasher: SecretHasher,
}

impl<AR, SS> AccountService<AR, SS>
where
    AR: AccountRepository,
    SS: SessionStore,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `sessions` - Refresh token hash slot storage
    /// * `issuer` - Token issuer holding the signing policies
    pub fn new(repository: Arc<AR>, sessions: Arc<SS>, issuer: Arc<CredentialIssuer>) -> Self {
        Self {
            repository,
            sessions,
            issuer,
            hasher: SecretHasher::new(),
        }
    }

    /// Hash on the blocking pool.
    async fn hash_secret(&self, raw: String) -> Result<String, AccountError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&raw))
            .await
            .map_err(|e| AccountError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AccountError::Hashing(e.to_string()))
    }

    async fn verify_secret(&self, raw: String, hash: String) -> Result<bool, AccountError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&raw, &hash))
            .await
            .map_err(|e| AccountError::Unknown(format!("Verification task failed: {}", e)))
    }

    /// Issue a pair under `scope` and make its refresh secret the only valid one.
    async fn open_session(
        &self,
        id: &AccountId,
        scope: RefreshScope,
    ) -> Result<SessionCredentials, AccountError> {
        let issued = self
            .issuer
            .issue(id, scope)
            .map_err(|e| AccountError::TokenIssuance(e.to_string()))?;

        let refresh_hash = self.hash_secret(issued.raw_refresh_secret).await?;
        self.sessions
            .save_refresh_hash(id, Some(refresh_hash))
            .await?;

        tracing::info!(account_id = %id, scope = %scope, "Session opened");

        Ok(SessionCredentials {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
        })
    }
}

#[async_trait]
impl<AR, SS> AccountServicePort for AccountService<AR, SS>
where
    AR: AccountRepository,
    SS: SessionStore,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedSession, AccountError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.hash_secret(command.password.into_inner()).await?;
        let now = Utc::now();

        let account = Account {
            id: AccountId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            refresh_token_hash: None,
            created_at: now,
            updated_at: now,
        };

        let account = self.repository.create(account).await?;
        let credentials = self.open_session(&account.id, RefreshScope::Standard).await?;

        Ok(AuthenticatedSession {
            account,
            credentials,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, AccountError> {
        let Some(account) = self.repository.find_by_email(&command.email).await? else {
            tracing::warn!("Login rejected: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let password_matches = self
            .verify_secret(command.password, account.password_hash.clone())
            .await?;
        if !password_matches {
            tracing::warn!(account_id = %account.id, "Login rejected: wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let scope = if command.remember_me {
            RefreshScope::Extended
        } else {
            RefreshScope::Standard
        };
        let credentials = self.open_session(&account.id, scope).await?;

        Ok(AuthenticatedSession {
            account,
            credentials,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionCredentials, AccountError> {
        let (scope, claims) = match self.issuer.verify_refresh(refresh_token) {
            RefreshVerification::Valid { scope, claims } => (scope, claims),
            RefreshVerification::Invalid => {
                tracing::warn!("Refresh rejected: token failed verification under both scopes");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let id =
            AccountId::from_string(&claims.sub).map_err(|_| AccountError::InvalidCredentials)?;

        if self.repository.find_by_id(&id).await?.is_none() {
            tracing::warn!(account_id = %id, "Refresh rejected: account no longer exists");
            return Err(AccountError::InvalidCredentials);
        }

        let stored_hash = match self.sessions.load_refresh_hash(&id).await {
            Ok(Some(hash)) => hash,
            Ok(None) | Err(AccountError::NotFound(_)) => {
                tracing::warn!(account_id = %id, "Refresh rejected: no active session");
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !self.verify_secret(claims.token, stored_hash.clone()).await? {
            tracing::warn!(account_id = %id, "Refresh rejected: secret does not match session");
            return Err(AccountError::InvalidCredentials);
        }

        let issued = self
            .issuer
            .issue(id, scope)
            .map_err(|e| AccountError::TokenIssuance(e.to_string()))?;
        let new_hash = self.hash_secret(issued.raw_refresh_secret).await?;

        if !self
            .sessions
            .swap_refresh_hash(&id, &stored_hash, &new_hash)
            .await?
        {
            tracing::warn!(account_id = %id, "Refresh rejected: session rotated concurrently");
            return Err(AccountError::InvalidCredentials);
        }

        tracing::info!(account_id = %id, scope = %scope, "Session rotated");

        Ok(SessionCredentials {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
        })
    }

    async fn revoke(&self, id: &AccountId) -> Result<(), AccountError> {
        self.sessions.save_refresh_hash(id, None).await?;
        tracing::info!(account_id = %id, "Session revoked");
        Ok(())
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError> {
        if let Some(new_email) = &command.email {
            if let Some(other) = self.repository.find_by_email(new_email).await? {
                if other.id != *id {
                    return Err(AccountError::EmailAlreadyExists(
                        new_email.as_str().to_string(),
                    ));
                }
            }
        }

        let password_hash = match command.password {
            Some(new_password) => Some(self.hash_secret(new_password.into_inner()).await?),
            None => None,
        };
        let password_changed = password_hash.is_some();

        let changes = AccountChanges {
            name: command.name,
            email: command.email,
            password_hash,
        };
        let mut updated = self.repository.update(id, changes).await?;

        if password_changed {
            self.sessions.save_refresh_hash(id, None).await?;
            updated.refresh_token_hash = None;
            tracing::info!(account_id = %id, "Session revoked after password change");
        }

        Ok(updated)
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError> {
        self.repository.delete(id).await?;
        tracing::info!(account_id = %id, "Account deleted");
        Ok(())
    }
}
