use std::fmt;

use chrono::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::RefreshClaims;

/// Longest lifetime any token policy may carry.
const MAX_LIFETIME_DAYS: i64 = 3650;

/// Lifetime policy a refresh token is signed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshScope {
    /// Default session lifetime.
    Standard,
    /// "Remember me" session lifetime.
    Extended,
}

impl fmt::Display for RefreshScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshScope::Standard => f.write_str("standard"),
            RefreshScope::Extended => f.write_str("extended"),
        }
    }
}

/// Signing secret and lifetime for one kind of token.
#[derive(Clone)]
pub struct TokenPolicy {
    pub secret: String,
    pub lifetime: Duration,
}

impl TokenPolicy {
    pub fn new(secret: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            secret: secret.into(),
            lifetime,
        }
    }
}

impl fmt::Debug for TokenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPolicy")
            .field("secret", &"<redacted>")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

/// Policies for the access token and both refresh scopes.
#[derive(Debug, Clone)]
pub struct IssuerSettings {
    pub access: TokenPolicy,
    pub standard_refresh: TokenPolicy,
    pub extended_refresh: TokenPolicy,
}

/// Errors raised while building a [`CredentialIssuer`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssuerError {
    #[error("Token policies must use distinct secrets: {0} and {1} share one")]
    SharedSecret(&'static str, &'static str),

    #[error("Token lifetime for {0} must be positive")]
    NonPositiveLifetime(&'static str),

    #[error("Token lifetime for {0} must not exceed ten years")]
    ExcessiveLifetime(&'static str),
}

/// Freshly minted credential pair.
///
/// `raw_refresh_secret` is the value embedded in `refresh_token`. The caller
/// hashes it and commits the hash to the session store; issuing alone
/// persists nothing.
pub struct IssuedCredentials {
    pub access_token: String,
    pub refresh_token: String,
    pub raw_refresh_secret: String,
    pub scope: RefreshScope,
}

impl fmt::Debug for IssuedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedCredentials")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Outcome of checking a refresh token against both scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshVerification {
    Valid {
        scope: RefreshScope,
        claims: RefreshClaims,
    },
    Invalid,
}

/// Mints and verifies access and refresh tokens.
///
/// Each token kind is signed with its own secret, so a token validates under
/// at most one policy.
pub struct CredentialIssuer {
    access: JwtHandler,
    standard_refresh: JwtHandler,
    extended_refresh: JwtHandler,
    access_lifetime: Duration,
    standard_lifetime: Duration,
    extended_lifetime: Duration,
}

impl CredentialIssuer {
    /// Build an issuer from injected policies.
    ///
    /// # Errors
    /// * `SharedSecret` - Two policies use the same signing secret
    /// * `NonPositiveLifetime` - A policy has a zero or negative lifetime
    /// * `ExcessiveLifetime` - A policy outlives ten years
    pub fn new(settings: IssuerSettings) -> Result<Self, IssuerError> {
        let max_lifetime = Duration::days(MAX_LIFETIME_DAYS);
        let named = [
            ("access", &settings.access),
            ("standard refresh", &settings.standard_refresh),
            ("extended refresh", &settings.extended_refresh),
        ];

        for (i, (name, policy)) in named.iter().enumerate() {
            if policy.lifetime <= Duration::zero() {
                return Err(IssuerError::NonPositiveLifetime(*name));
            }
            if policy.lifetime > max_lifetime {
                return Err(IssuerError::ExcessiveLifetime(*name));
            }
            for (other_name, other) in &named[i + 1..] {
                if policy.secret == other.secret {
                    return Err(IssuerError::SharedSecret(*name, *other_name));
                }
            }
        }

        Ok(Self {
            access: JwtHandler::new(settings.access.secret.as_bytes()),
            standard_refresh: JwtHandler::new(settings.standard_refresh.secret.as_bytes()),
            extended_refresh: JwtHandler::new(settings.extended_refresh.secret.as_bytes()),
            access_lifetime: settings.access.lifetime,
            standard_lifetime: settings.standard_refresh.lifetime,
            extended_lifetime: settings.extended_refresh.lifetime,
        })
    }

    /// Mint an access token and a refresh token under `scope`.
    ///
    /// A new random refresh secret is generated on every call.
    pub fn issue(
        &self,
        subject: impl ToString,
        scope: RefreshScope,
    ) -> Result<IssuedCredentials, JwtError> {
        let subject = subject.to_string();
        let raw_refresh_secret = Uuid::new_v4().to_string();

        let access_token = self
            .access
            .encode(&AccessClaims::for_subject(&subject, self.access_lifetime))?;

        let refresh_claims = RefreshClaims::for_subject(
            &subject,
            raw_refresh_secret.clone(),
            self.refresh_lifetime(scope),
        );
        let refresh_token = self.refresh_handler(scope).encode(&refresh_claims)?;

        Ok(IssuedCredentials {
            access_token,
            refresh_token,
            raw_refresh_secret,
            scope,
        })
    }

    /// Validate an access token (signature and expiry).
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.access.decode(token)
    }

    /// Validate a refresh token under the standard scope, then the extended one.
    pub fn verify_refresh(&self, token: &str) -> RefreshVerification {
        for scope in [RefreshScope::Standard, RefreshScope::Extended] {
            if let Ok(claims) = self.refresh_handler(scope).decode::<RefreshClaims>(token) {
                return RefreshVerification::Valid { scope, claims };
            }
        }

        RefreshVerification::Invalid
    }

    fn refresh_lifetime(&self, scope: RefreshScope) -> Duration {
        match scope {
            RefreshScope::Standard => self.standard_lifetime,
            RefreshScope::Extended => self.extended_lifetime,
        }
    }

    fn refresh_handler(&self, scope: RefreshScope) -> &JwtHandler {
        match scope {
            RefreshScope::Standard => &self.standard_refresh,
            RefreshScope::Extended => &self.extended_refresh,
        }
    }
}
