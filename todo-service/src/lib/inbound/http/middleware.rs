use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension holding the account resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account: Account,
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}

/// Middleware that validates the access token and loads its account.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.issuer.verify_access(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        unauthorized("Invalid or expired token")
    })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Access token subject is not an account id");
        unauthorized("Invalid token format")
    })?;

    let account = state
        .account_service
        .get_account(&account_id)
        .await
        .map_err(|e| match e {
            AccountError::NotFound(_) => {
                tracing::warn!(account_id = %account_id, "Access token for missing account");
                unauthorized("Invalid or expired token")
            }
            other => ApiError::from(other).into_response(),
        })?;

    req.extensions_mut()
        .insert(AuthenticatedAccount { account });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization header format. Expected: Bearer <token>"))
}
