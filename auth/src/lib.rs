//! Credential and token primitives
//!
//! Provides the building blocks of the authentication service:
//! - Password hashing (Argon2id, random salt per hash)
//! - Signed, time-limited access tokens (JWT, HMAC)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Algorithm, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256).unwrap();
//! let token = handler.issue("alice", Duration::minutes(30)).unwrap();
//! let claims = handler.validate(&token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Algorithm, Authenticator};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Algorithm::HS256,
//!     Duration::minutes(30),
//! )
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", Some(&hash), "alice").unwrap();
//!
//! // Resolve caller: validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::DEFAULT_ACCESS_TOKEN_TTL_MINUTES;
pub use authenticator::TOKEN_TYPE;
pub use jsonwebtoken::Algorithm;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
