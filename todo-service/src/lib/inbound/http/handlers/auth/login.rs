use std::fmt;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::SessionResponseData;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    // A malformed email cannot belong to any account.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::from(AccountError::InvalidCredentials))?;

    let command = LoginCommand {
        email,
        password: body.password,
        remember_me: body.remember_me,
    };

    state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
    #[serde(default)]
    remember_me: bool,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}
