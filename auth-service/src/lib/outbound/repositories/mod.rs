use sqlx::FromRow;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::AuthError;

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresUserRepository;
pub use sqlite::SqliteUserRepository;

/// Storage shape of a `users` row.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    hashed_password: String,
}

impl TryFrom<UserRow> for User {
    type Error = AuthError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            password_hash: row.hashed_password,
        })
    }
}

/// Unique violations on insert mean the username is already registered.
fn insert_error(err: sqlx::Error, username: &Username) -> AuthError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return AuthError::UsernameTaken(username.as_str().to_string());
        }
    }
    AuthError::StorageUnavailable(err.to_string())
}
