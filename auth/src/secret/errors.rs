use thiserror::Error;

/// Error type for secret hashing.
#[derive(Debug, Clone, Error)]
pub enum SecretError {
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),
}
