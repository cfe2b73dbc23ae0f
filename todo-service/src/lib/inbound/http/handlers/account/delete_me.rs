use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::SuccessData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_me(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    state
        .account_service
        .delete_account(&current.account.id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, SuccessData::ok()))
}
