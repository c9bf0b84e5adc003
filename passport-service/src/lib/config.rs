use std::env;

use config::builder::ConfigBuilder as ConfigBuilderState;
use config::builder::DefaultState;
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
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing settings. Lifetimes are in seconds.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_expires_secs: i64,
    pub refresh_expires_secs: i64,
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Longest token lifetime accepted from configuration (ten years).
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 10 * 365 * 24 * 60 * 60;

fn default_max_connections() -> u32 {
    5
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_expires_secs", &self.access_expires_secs)
            .field("refresh_expires_secs", &self.refresh_expires_secs)
            .finish()
    }
}

impl auth::SigningConfig for JwtConfig {
    fn secret_key(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    fn access_expires_in(&self) -> i64 {
        self.access_expires_secs
    }

    fn refresh_expires_in(&self) -> i64 {
        self.refresh_expires_secs
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. `path` when given (must exist), otherwise
    ///    config/{RUN_MODE}.toml layered over config/default.toml
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = match path {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => {
                let run_mode =
                    env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
                builder
                    .add_source(File::with_name("config/default").required(false))
                    .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            }
        };

        Self::with_environment(builder)
    }

    /// Layer environment variables over `builder`, then deserialize and validate.
    fn with_environment(builder: ConfigBuilderState<DefaultState>) -> Result<Self, ConfigError> {
        // Example: DATABASE__URL=postgres://... overrides database.url
        let config: Self = builder
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()?;

        config.jwt.validate()?;

        Ok(config)
    }
}

impl JwtConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, secs) in [
            ("jwt.access_expires_secs", self.access_expires_secs),
            ("jwt.refresh_expires_secs", self.refresh_expires_secs),
        ] {
            if secs <= 0 || secs > MAX_TOKEN_LIFETIME_SECS {
                return Err(ConfigError::Message(format!(
                    "{} must be between 1 and {} seconds, got {}",
                    key, MAX_TOKEN_LIFETIME_SECS, secs
                )));
            }
        }

        Ok(())
    }
}
