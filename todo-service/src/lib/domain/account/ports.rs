use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountChanges;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthenticatedSession;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::SessionCredentials;
use crate::domain::account::models::UpdateAccountCommand;

/// Port for account and session operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Create an account and open its first session (standard scope).
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthenticatedSession, AccountError>;

    /// Verify email and password and open a session.
    ///
    /// Any session the account already had is replaced.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, AccountError>;

    /// Exchange a refresh token for a new credential pair.
    ///
    /// The presented token stops working once this returns. The new refresh
    /// token keeps the scope of the one presented.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Token invalid, expired, rotated, revoked, or its account is gone
    async fn refresh(&self, refresh_token: &str) -> Result<SessionCredentials, AccountError>;

    /// Revoke the account's session so its last refresh token is rejected.
    async fn revoke(&self, id: &AccountId) -> Result<(), AccountError>;

    /// # Errors
    /// * `NotFound` - Account does not exist
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Update profile fields. A password change also revokes the session.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - New email belongs to another account
    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError>;

    /// # Errors
    /// * `NotFound` - Account does not exist
    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Write the fields set in `changes` and bump `updated_at`, in one step.
    ///
    /// Fields left as `None` keep whatever is stored at write time. The
    /// refresh token hash is not touched; see [`SessionStore`].
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    async fn update(
        &self,
        id: &AccountId,
        changes: AccountChanges,
    ) -> Result<Account, AccountError>;

    /// Remove account (and its todos) from storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}

/// Single-slot storage for each account's refresh token hash.
///
/// Implementations must make every operation atomic per account.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Current refresh token hash, `None` when no session is active.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    async fn load_refresh_hash(&self, id: &AccountId) -> Result<Option<String>, AccountError>;

    /// Overwrite the slot. `None` clears it.
    async fn save_refresh_hash(
        &self,
        id: &AccountId,
        hash: Option<String>,
    ) -> Result<(), AccountError>;

    /// Replace the slot with `new` only if it still holds `expected`.
    ///
    /// Returns false when another writer got there first.
    async fn swap_refresh_hash(
        &self,
        id: &AccountId,
        expected: &str,
        new: &str,
    ) -> Result<bool, AccountError>;
}
