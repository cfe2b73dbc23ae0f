use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::models::SessionCredentials;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    state
        .account_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|credentials| ApiSuccess::new(StatusCode::OK, credentials.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequest {
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<SessionCredentials> for RefreshResponseData {
    fn from(credentials: SessionCredentials) -> Self {
        Self {
            access_token: credentials.access_token,
            refresh_token: credentials.refresh_token,
        }
    }
}
