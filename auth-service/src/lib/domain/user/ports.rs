use async_trait::async_trait;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::StorageHealth;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::AuthError;

/// Port for authentication domain operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account with a freshly hashed password.
    ///
    /// # Arguments
    /// * `command` - Validated username and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `StorageUnavailable` - Storage operation failed
    /// * `Internal` - Password hashing failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Exchange credentials for a bearer token.
    ///
    /// # Arguments
    /// * `command` - Username and plaintext password
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (not distinguished)
    /// * `StorageUnavailable` - Storage operation failed
    /// * `Internal` - Token signing failed
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AuthError>;

    /// Resolve the account a bearer token vouches for.
    ///
    /// # Arguments
    /// * `token` - Raw bearer token
    ///
    /// # Returns
    /// User the token's subject names
    ///
    /// # Errors
    /// * `Unauthenticated` - Token is malformed, forged, expired, or names no existing user
    /// * `StorageUnavailable` - Storage operation failed
    async fn resolve_caller(&self, token: &str) -> Result<User, AuthError>;

    /// Probe storage connectivity.
    ///
    /// # Errors
    /// * `StorageUnavailable` - Storage is unreachable
    async fn check_health(&self) -> Result<StorageHealth, AuthError>;
}

/// Persistence operations for user records.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Uniqueness is enforced by the storage constraint, not by a prior read.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `StorageUnavailable` - Storage operation failed
    async fn insert(&self, user: NewUser) -> Result<User, AuthError>;

    /// Retrieve user by exact username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StorageUnavailable` - Storage operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

    /// Run a trivial query and report whether the users table exists.
    ///
    /// # Errors
    /// * `StorageUnavailable` - Storage is unreachable
    async fn check_health(&self) -> Result<StorageHealth, AuthError>;
}
