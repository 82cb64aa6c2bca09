//! Issuer configuration.
//!
//! The credential is read once at startup and is immutable afterwards.
//! Missing credentials are a startup failure, never an issuance error.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use rtc_token_core::Role;

use crate::error::{ConfigError, Result};

/// Environment variable holding the app id.
pub const ENV_APP_ID: &str = "APP_ID";
/// Environment variable holding the app certificate.
pub const ENV_APP_CERTIFICATE: &str = "APP_CERTIFICATE";
/// Optional role override (`publisher` or `subscriber`).
pub const ENV_TOKEN_ROLE: &str = "TOKEN_ROLE";
/// Optional token lifetime override in seconds.
pub const ENV_TOKEN_TTL_SECS: &str = "TOKEN_TTL_SECS";

/// Default token lifetime: one hour.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// The application identity and its signing secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AppCredential {
    app_id: String,
    app_certificate: String,
}

impl AppCredential {
    /// Create a credential. Both parts must be non-empty.
    pub fn new(app_id: impl Into<String>, app_certificate: impl Into<String>) -> Result<Self> {
        let app_id = app_id.into();
        let app_certificate = app_certificate.into();

        if app_id.trim().is_empty() {
            return Err(ConfigError::MissingVar(ENV_APP_ID));
        }
        if app_certificate.trim().is_empty() {
            return Err(ConfigError::MissingVar(ENV_APP_CERTIFICATE));
        }

        Ok(Self {
            app_id,
            app_certificate,
        })
    }

    /// The app id.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// The signing secret.
    pub fn app_certificate(&self) -> &str {
        &self.app_certificate
    }
}

impl fmt::Debug for AppCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredential")
            .field("app_id", &self.app_id)
            .field("app_certificate", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for request-driven issuance.
#[derive(Debug, Clone)]
pub struct IssuerConfig {
    /// Credential used to sign every token.
    pub credential: AppCredential,
    /// Role granted to request-driven tokens.
    pub role: Role,
    /// Lifetime of request-driven tokens.
    pub token_ttl: Duration,
}

impl IssuerConfig {
    /// Publisher tokens valid for one hour.
    pub fn new(credential: AppCredential) -> Self {
        Self {
            credential,
            role: Role::Publisher,
            token_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }

    /// Override the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load from a dotenv-style file, falling back to it for any variable
    /// the process environment does not set.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with(path.as_ref(), |name| std::env::var(name).ok())
    }

    fn from_file_with<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_file_error = |e: dotenvy::Error| ConfigError::EnvFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let mut file_vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(env_file_error)? {
            let (key, value) = item.map_err(env_file_error)?;
            file_vars.insert(key, value);
        }

        Self::from_vars(|name| lookup(name).or_else(|| file_vars.get(name).cloned()))
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());

        let app_id = get(ENV_APP_ID).ok_or(ConfigError::MissingVar(ENV_APP_ID))?;
        let app_certificate =
            get(ENV_APP_CERTIFICATE).ok_or(ConfigError::MissingVar(ENV_APP_CERTIFICATE))?;
        let mut config = Self::new(AppCredential::new(app_id, app_certificate)?);

        if let Some(role) = get(ENV_TOKEN_ROLE) {
            config.role = role.parse().map_err(|_| ConfigError::Invalid {
                var: ENV_TOKEN_ROLE,
                reason: format!("expected publisher or subscriber, got {role:?}"),
            })?;
        }

        if let Some(ttl) = get(ENV_TOKEN_TTL_SECS) {
            let secs: u64 = ttl.trim().parse().map_err(|_| ConfigError::Invalid {
                var: ENV_TOKEN_TTL_SECS,
                reason: format!("not a number of seconds: {ttl:?}"),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: ENV_TOKEN_TTL_SECS,
                    reason: "must be positive".into(),
                });
            }
            config.token_ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
