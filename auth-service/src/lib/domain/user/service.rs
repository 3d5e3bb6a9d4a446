use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::StorageHealth;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Stateless across requests; every call reads through the repository.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token handling, built from process configuration
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        let RegisterCommand { username, password } = command;

        // Fast path only; the unique constraint decides on insert.
        if self.repository.find_by_username(&username).await?.is_some() {
            tracing::info!(username = %username, "Registration rejected: username taken");
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let password = Password::new(password)?;

        let authenticator = Arc::clone(&self.authenticator);
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))??;

        let user = self
            .repository
            .insert(NewUser {
                username,
                password_hash,
            })
            .await
            .map_err(|e| {
                if let AuthError::UsernameTaken(name) = &e {
                    tracing::info!(username = %name, "Registration lost race on username");
                }
                e
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AuthError> {
        let LoginCommand { username, password } = command;

        let stored_hash = self
            .repository
            .find_by_username(&username)
            .await?
            .map(|user| user.password_hash);

        let authenticator = Arc::clone(&self.authenticator);
        let subject = username.as_str().to_string();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, stored_hash.as_deref(), &subject)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?;

        match result {
            Ok(result) => {
                tracing::info!(username = %username, "User logged in");
                Ok(AccessToken {
                    access_token: result.access_token,
                    token_type: result.token_type.to_string(),
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!(username = %username, "Login rejected");
                Err(AuthError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => {
                Err(AuthError::Internal(format!("Token signing failed: {}", e)))
            }
        }
    }

    async fn resolve_caller(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(reason = %e, "Bearer token rejected");
            AuthError::Unauthenticated
        })?;

        let username = Username::new(claims.sub).map_err(|e| {
            tracing::warn!(reason = %e, "Bearer token subject is not a username");
            AuthError::Unauthenticated
        })?;

        self.repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %username, "Bearer token subject no longer exists");
                AuthError::Unauthenticated
            })
    }

    async fn check_health(&self) -> Result<StorageHealth, AuthError> {
        self.repository.check_health().await
    }
}
