use std::env;
use std::str::FromStr;

use auth::Algorithm;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// `postgres://...` or `sqlite:...`
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
}

impl JwtConfig {
    /// Parse the configured algorithm name (e.g. "HS256").
    pub fn algorithm(&self) -> Result<Algorithm, ConfigError> {
        Algorithm::from_str(&self.algorithm).map_err(|e| {
            ConfigError::Message(format!("jwt.algorithm '{}': {}", self.algorithm, e))
        })
    }

    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_expire_minutes)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.), including a `.env` file
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.url", "postgresql://user:password@db/auth_db")?
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 8000)?
            .set_default("jwt.algorithm", "HS256")?
            .set_default(
                "jwt.access_token_expire_minutes",
                auth::DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings that would make every request fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }

        match self.jwt.algorithm()? {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {}
            other => {
                return Err(ConfigError::Message(format!(
                    "jwt.algorithm must be an HMAC algorithm, got {:?}",
                    other
                )))
            }
        }

        if self.jwt.access_token_expire_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.access_token_expire_minutes must be positive".into(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be positive".into(),
            ));
        }

        Ok(())
    }
}
