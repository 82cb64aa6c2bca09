//! Error types for the issuer crate.

use thiserror::Error;

/// Startup configuration problems.
///
/// These are fatal for the surrounding service; issuance and validation
/// never produce them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required setting {0}")]
    MissingVar(&'static str),

    /// A variable is set but unusable.
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    /// A dotenv file exists but cannot be read or parsed.
    #[error("cannot load {path}: {reason}")]
    EnvFile { path: String, reason: String },
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
