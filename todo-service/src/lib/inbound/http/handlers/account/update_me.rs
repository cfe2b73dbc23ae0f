use std::fmt;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::UpdateAccountCommand;
use crate::inbound::http::handlers::AccountData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating the current account (raw JSON)
#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for UpdateMeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateMeRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl UpdateMeRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, AccountError> {
        let name = self.name.map(DisplayName::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        let password = self.password.map(Password::new).transpose()?;

        Ok(UpdateAccountCommand {
            name,
            email,
            password,
        })
    }
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedAccount>,
    Json(req): Json<UpdateMeRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let command = req.try_into_command()?;
    if command.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    state
        .account_service
        .update_account(&current.account.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
