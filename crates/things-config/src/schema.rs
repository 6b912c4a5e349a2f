//! Configuration section types.

use serde::{Deserialize, Serialize};
use things_core::ActorId;
use things_telemetry::{LogConfig, LogFormat};

/// Database section: where statements are executed.
///
/// # Example
///
/// ```
/// use things_config::DatabaseConfig;
///
/// let config = DatabaseConfig {
///     cluster_arn: "arn:aws:rds:eu-west-1:123:cluster:things".to_string(),
///     secret_arn: "arn:aws:secretsmanager:eu-west-1:123:secret:things".to_string(),
///     name: "things".to_string(),
///     endpoint: "http://localhost:8081".to_string(),
/// };
/// assert!(config.is_complete());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Cluster resource ARN (`DB_CLUSTER_ARN`).
    #[serde(default)]
    pub cluster_arn: String,

    /// Credentials secret ARN (`DB_SECRET_ARN`).
    #[serde(default)]
    pub secret_arn: String,

    /// Database name (`DB_NAME`).
    #[serde(default)]
    pub name: String,

    /// Base URL of the statement-execution endpoint (`DB_ENDPOINT`).
    #[serde(default)]
    pub endpoint: String,
}

impl DatabaseConfig {
    /// Returns the dotted names of required fields that are empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("database.cluster_arn", &self.cluster_arn),
            ("database.secret_arn", &self.secret_arn),
            ("database.name", &self.name),
            ("database.endpoint", &self.endpoint),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Returns true if every field is set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Actor section: identity written to `created_by` / `updated_by`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ActorConfig {
    /// Placeholder identity.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
        }
    }
}

impl ActorConfig {
    /// Returns the configured identity.
    #[must_use]
    pub fn actor_id(&self) -> ActorId {
        ActorId::new(self.placeholder.clone())
    }
}

fn default_placeholder() -> String {
    ActorId::PLACEHOLDER.to_string()
}

/// Server section for the local HTTP host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address (e.g. `"0.0.0.0:8080"`).
    #[serde(default = "default_http_addr")]
    pub http_addr: String,

    /// Seconds open connections get to finish after shutdown.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Parses the bind address.
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        self.http_addr.parse()
    }

    /// Grace period for open connections on shutdown.
    pub fn shutdown_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

fn default_http_addr() -> String {
    "0.0.0.0:8080".to_string()
}

const fn default_shutdown_timeout_secs() -> u64 {
    30
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Converts the section into the subscriber configuration.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        let base = match self.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };
        LogConfig {
            enabled: self.enabled,
            ..base.with_level(self.level.clone())
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_missing_fields() {
        let config = DatabaseConfig {
            name: "things".to_string(),
            ..DatabaseConfig::default()
        };
        assert_eq!(
            config.missing_fields(),
            vec!["database.cluster_arn", "database.secret_arn", "database.endpoint"]
        );
        assert!(!config.is_complete());
    }

    #[test]
    fn test_actor_default_is_placeholder() {
        assert_eq!(ActorConfig::default().actor_id().as_str(), "system");
    }

    #[test]
    fn test_logging_to_log_config() {
        let section = LoggingConfig {
            enabled: true,
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        };
        let config = section.to_log_config();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_shutdown_timeout_default_and_override() {
        assert_eq!(ServerConfig::default().shutdown_timeout().as_secs(), 30);

        let config: ServerConfig =
            serde_json::from_str(r#"{"http_addr": "0.0.0.0:1", "shutdown_timeout_secs": 5}"#).unwrap();
        assert_eq!(config.shutdown_timeout().as_secs(), 5);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ServerConfig, _> =
            serde_json::from_str(r#"{"http_addr": "0.0.0.0:1", "port": 1}"#);
        assert!(result.is_err());
    }
}
