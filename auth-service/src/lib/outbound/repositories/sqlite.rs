use std::str::FromStr;

use async_trait::async_trait;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use super::insert_error;
use super::UserRow;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::StorageHealth;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AuthError;

/// Embedded user store.
///
/// `sqlite::memory:` databases live inside a single connection, so the pool
/// is pinned to one connection that is never recycled.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `url`, creating the database file if needed.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(options)
                .await?
        };

        Ok(Self::new(pool))
    }

    /// Create the `users` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations/sqlite").run(&self.pool).await
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, hashed_password)
            VALUES (?, ?)
            RETURNING id, username, hashed_password
            "#,
        )
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| insert_error(e, &user.username))?;

        User::try_from(row)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, hashed_password
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn check_health(&self) -> Result<StorageHealth, AuthError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;

        let table: Option<String> = sqlx::query_scalar(
            r#"
            SELECT name FROM sqlite_master
            WHERE type = 'table' AND name = 'users'
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(StorageHealth {
            users_table_exists: table.is_some(),
        })
    }
}
