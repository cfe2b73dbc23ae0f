use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::AccountData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

pub async fn get_me(
    Extension(current): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&current.account).into()))
}
