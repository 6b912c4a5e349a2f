//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Why configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read (including when it does
    /// not exist).
    #[error("cannot read {}: {source}", path.display())]
    File {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension or format name is neither TOML nor JSON.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// The file or string is not valid for its format, or names an unknown
    /// field.
    #[error("malformed {format} configuration: {reason}")]
    Malformed {
        /// `"toml"` or `"json"`.
        format: &'static str,
        /// Parser message.
        reason: String,
    },

    /// A setting has a value that cannot be used. `field` is the dotted
    /// setting name, or the environment variable it came from.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting or variable name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The server needs a database setting that was left empty.
    #[error("database setting {0} is not set")]
    MissingDatabaseSetting(&'static str),

    /// A `.env` file exists but could not be parsed.
    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl ConfigError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(format: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Malformed {
            format,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::malformed("toml", err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed("json", err)
    }
}
