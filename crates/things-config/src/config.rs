//! The root configuration type.

use serde::{Deserialize, Serialize};

use crate::{ActorConfig, ConfigError, DatabaseConfig, LoggingConfig, ServerConfig};

/// Complete Things API configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and the
/// environment.
///
/// # Example
///
/// ```
/// use things_config::ThingsConfig;
///
/// let config = ThingsConfig::default();
/// assert_eq!(config.server.http_addr, "0.0.0.0:8080");
/// assert_eq!(config.actor.placeholder, "system");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ThingsConfig {
    /// Statement-execution target.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Identity recorded on writes.
    #[serde(default)]
    pub actor: ActorConfig,

    /// Local HTTP host settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ThingsConfig {
    /// Validates the configuration.
    ///
    /// The database section is not checked here; see
    /// [`require_database`](Self::require_database).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The server address is not a socket address
    /// - The log filter is invalid
    /// - The actor placeholder is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.socket_addr().is_err() {
            return Err(ConfigError::invalid_value(
                "server.http_addr",
                format!("invalid socket address: {}", self.server.http_addr),
            ));
        }

        if let Err(e) = things_telemetry::create_env_filter(&self.logging.level) {
            return Err(ConfigError::invalid_value("logging.level", e.to_string()));
        }

        if self.actor.placeholder.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "actor.placeholder",
                "must not be empty",
            ));
        }

        Ok(())
    }

    /// Fails unless every database field is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDatabaseSetting` naming the first empty
    /// field.
    pub fn require_database(&self) -> Result<&DatabaseConfig, ConfigError> {
        match self.database.missing_fields().into_iter().next() {
            Some(field) => Err(ConfigError::MissingDatabaseSetting(field)),
            None => Ok(&self.database),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(ThingsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_addr() {
        let mut config = ThingsConfig::default();
        config.server.http_addr = "localhost".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.http_addr"
        ));
    }

    #[test]
    fn test_empty_actor_rejected() {
        let mut config = ThingsConfig::default();
        config.actor.placeholder = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_require_database() {
        let mut config = ThingsConfig::default();
        assert!(matches!(
            config.require_database(),
            Err(ConfigError::MissingDatabaseSetting("database.cluster_arn"))
        ));

        config.database = DatabaseConfig {
            cluster_arn: "arn:cluster".to_string(),
            secret_arn: "arn:secret".to_string(),
            name: "things".to_string(),
            endpoint: "http://localhost:8081".to_string(),
        };
        assert_eq!(config.require_database().unwrap().name, "things");
    }
}
