use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn root() -> ApiSuccess<RootResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        RootResponseData {
            status: "Todo API is running".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootResponseData {
    pub status: String,
}
