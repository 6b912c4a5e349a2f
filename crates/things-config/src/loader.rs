//! Layered configuration loader.

use std::env;
use std::fs;
use std::path::Path;

use crate::{ConfigError, ThingsConfig};

/// Environment variables read by deployed functions, mapped onto the
/// database section.
pub const DATABASE_ENV_VARS: [&str; 4] = ["DB_CLUSTER_ARN", "DB_SECRET_ARN", "DB_NAME", "DB_ENDPOINT"];

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values
/// 2. Configuration file (TOML or JSON)
/// 3. `.env` file
/// 4. Environment variables (`DB_*` and `PREFIX__SECTION__KEY`)
///
/// # Example
///
/// ```no_run
/// use things_config::ConfigLoader;
///
/// # fn main() -> Result<(), things_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("things.toml")?
///     .with_dotenv()?
///     .with_database_env()
///     .with_env_prefix("THINGS")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: ThingsConfig,
    env_prefix: Option<String>,
    database_env: bool,
}

impl ConfigLoader {
    /// Create a new loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file.
    ///
    /// The format is chosen by extension (`.toml` or `.json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::File` if the file is missing or unreadable,
    /// and `ConfigError::Malformed` if it does not parse or names an unknown
    /// field.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::file(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in the given format.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails or the format is unknown.
    ///
    /// # Example
    ///
    /// ```
    /// use things_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [server]
    ///     http_addr = "127.0.0.1:3000"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.server.http_addr, "127.0.0.1:3000");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => return Err(ConfigError::UnsupportedFormat(format.to_string())),
        };
        Ok(self)
    }

    /// Load a `.env` file into the process environment, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if the file exists but cannot be parsed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Read `DB_CLUSTER_ARN`, `DB_SECRET_ARN`, `DB_NAME` and `DB_ENDPOINT`.
    #[must_use]
    pub fn with_database_env(mut self) -> Self {
        self.database_env = true;
        self
    }

    /// Set the prefix for `PREFIX__SECTION__KEY` overrides.
    ///
    /// For example, with prefix `THINGS`:
    /// - `THINGS__SERVER__HTTP_ADDR=0.0.0.0:9000`
    /// - `THINGS__SERVER__SHUTDOWN_TIMEOUT_SECS=10`
    /// - `THINGS__LOGGING__FORMAT=pretty`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Apply environment overrides, validate, and return the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override cannot be parsed or validation
    /// fails.
    pub fn load(mut self) -> Result<ThingsConfig, ConfigError> {
        if self.database_env {
            for var in DATABASE_ENV_VARS {
                if let Ok(value) = env::var(var) {
                    self.apply_database_var(var, &value);
                }
            }
        }

        if let Some(prefix) = self.env_prefix.take() {
            let vars: Vec<(String, String)> = env::vars()
                .filter(|(k, _)| k.starts_with(&prefix))
                .collect();
            for (key, value) in vars {
                self.apply_env_var(&key, &value, &prefix)?;
            }
        }

        self.config.validate()?;
        Ok(self.config)
    }

    fn parse_file(content: &str, path: &Path) -> Result<ThingsConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn apply_database_var(&mut self, var: &str, value: &str) {
        let database = &mut self.config.database;
        match var {
            "DB_CLUSTER_ARN" => database.cluster_arn = value.to_string(),
            "DB_SECRET_ARN" => database.secret_arn = value.to_string(),
            "DB_NAME" => database.name = value.to_string(),
            "DB_ENDPOINT" => database.endpoint = value.to_string(),
            _ => {}
        }
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(rest) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix("__")) else {
            return Ok(());
        };

        let parts: Vec<&str> = rest.split("__").collect();

        match parts.as_slice() {
            ["DATABASE", "CLUSTER_ARN"] => self.config.database.cluster_arn = value.to_string(),
            ["DATABASE", "SECRET_ARN"] => self.config.database.secret_arn = value.to_string(),
            ["DATABASE", "NAME"] => self.config.database.name = value.to_string(),
            ["DATABASE", "ENDPOINT"] => self.config.database.endpoint = value.to_string(),

            ["ACTOR", "PLACEHOLDER"] => self.config.actor.placeholder = value.to_string(),

            ["SERVER", "HTTP_ADDR"] => self.config.server.http_addr = value.to_string(),
            ["SERVER", "SHUTDOWN_TIMEOUT_SECS"] => {
                self.config.server.shutdown_timeout_secs = value
                    .parse()
                    .map_err(|_| ConfigError::invalid_value(key, "expected seconds"))?;
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::invalid_value(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => self.config.logging.level = value.to_string(),
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = value
                    .parse()
                    .map_err(|_| ConfigError::invalid_value(key, "expected 'json' or 'pretty'"))?;
            }

            _ => {}
        }

        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
