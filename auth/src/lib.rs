//! Authentication utilities library
//!
//! Provides the credential primitives the todo service builds its session
//! lifecycle on:
//! - Secret hashing (Argon2id) for passwords and refresh secrets
//! - JWT encoding and validation
//! - Access/refresh credential issuance under two refresh scopes
//!
//! Persistence is left to the caller: issuing a credential pair never stores
//! anything, the service hashes the raw refresh secret and commits it itself.
//!
//! # Examples
//!
//! ## Secret Hashing
//! ```
//! use auth::SecretHasher;
//!
//! let hasher = SecretHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Issuing and Verifying Credentials
//! ```
//! use auth::{CredentialIssuer, IssuerSettings, RefreshScope, RefreshVerification, TokenPolicy};
//! use chrono::Duration;
//!
//! let issuer = CredentialIssuer::new(IssuerSettings {
//!     access: TokenPolicy::new("access_secret_at_least_32_bytes_long", Duration::minutes(15)),
//!     standard_refresh: TokenPolicy::new("refresh_secret_at_least_32_bytes_long", Duration::days(7)),
//!     extended_refresh: TokenPolicy::new("remember_secret_at_least_32_bytes_long", Duration::days(30)),
//! })
//! .unwrap();
//!
//! let issued = issuer.issue("user123", RefreshScope::Extended).unwrap();
//! assert_eq!(issuer.verify_access(&issued.access_token).unwrap().sub, "user123");
//!
//! match issuer.verify_refresh(&issued.refresh_token) {
//!     RefreshVerification::Valid { scope, claims } => {
//!         assert_eq!(scope, RefreshScope::Extended);
//!         assert_eq!(claims.token, issued.raw_refresh_secret);
//!     }
//!     RefreshVerification::Invalid => unreachable!(),
//! }
//! ```

pub mod issuer;
pub mod jwt;
pub mod secret;

// Re-export commonly used items
pub use issuer::CredentialIssuer;
pub use issuer::IssuedCredentials;
pub use issuer::IssuerError;
pub use issuer::IssuerSettings;
pub use issuer::RefreshScope;
pub use issuer::RefreshVerification;
pub use issuer::TokenPolicy;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::RefreshClaims;
pub use secret::SecretError;
pub use secret::SecretHasher;
