pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use serde::Serialize;

pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
pub use register::register;

use super::AccountData;
use crate::domain::account::models::AuthenticatedSession;

/// Body returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub user: AccountData,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<AuthenticatedSession> for SessionResponseData {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            user: (&session.account).into(),
            access_token: session.credentials.access_token,
            refresh_token: session.credentials.refresh_token,
        }
    }
}
