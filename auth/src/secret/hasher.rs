use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::SecretError;

/// One-way hashing for untrusted secrets.
///
/// Used for account passwords and for the raw secrets embedded in refresh
/// tokens. Both are hashed with Argon2id under a fresh random salt, so the
/// same input never produces the same output twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretHasher;

impl SecretHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a raw secret.
    ///
    /// # Arguments
    /// * `raw` - Plaintext secret (password or refresh secret)
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, raw: &str) -> Result<String, SecretError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| SecretError::HashingFailed(e.to_string()))
    }

    /// Verify a raw secret against a stored hash.
    ///
    /// Returns false for a mismatch and for a hash that is not a valid PHC
    /// string. Argon2 compares the recomputed digest in constant time.
    pub fn verify(&self, raw: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(raw.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
