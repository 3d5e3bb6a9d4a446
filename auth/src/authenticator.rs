use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Token type reported alongside every issued access token.
pub const TOKEN_TYPE: &str = "bearer";

/// Default access token lifetime.
pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// Well-formed Argon2id hash with default parameters that no password matches.
///
/// Verified against when the account does not exist so both rejection paths
/// cost one full hash.
const DECOY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Authentication coordinator combining password verification and token issuance.
///
/// Built once at startup from process configuration and shared by reference.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: &'static str,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `algorithm` - HMAC signing algorithm
    /// * `access_token_ttl` - Lifetime of issued access tokens
    ///
    /// # Errors
    /// * `JwtError` - Secret or algorithm is unusable
    pub fn new(
        jwt_secret: &[u8],
        algorithm: Algorithm,
        access_token_ttl: Duration,
    ) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, algorithm)?,
            access_token_ttl,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash, `None` when the account does not exist
    /// * `subject` - Subject to embed in the token
    ///
    /// An unknown account still pays for one hash verification, so the two
    /// failure cases take the same time.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Account unknown or password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let Some(stored_hash) = stored_hash else {
            self.verify_password(password, DECOY_PASSWORD_HASH);
            return Err(AuthenticationError::InvalidCredentials);
        };

        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject)?;

        Ok(AuthenticationResult {
            access_token,
            token_type: TOKEN_TYPE,
        })
    }

    /// Issue an access token with the configured lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_token_with_ttl(subject, self.access_token_ttl)
    }

    /// Issue an access token with an explicit lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, ttl)
    }

    /// Validate and decode an access token.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged, expired or has no subject
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.validate(token)
    }
}
