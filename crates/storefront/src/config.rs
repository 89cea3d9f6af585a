//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `AICTRONICS_DATA_DIR` - Directory holding the local cart store (default: `.aictronics`)
//! - `AICTRONICS_CART_KEY` - Store key for the cart snapshot (default: `aictronics-cart`)
//! - `AICTRONICS_CATALOG_PATH` - JSON catalog file replacing the built-in products
//! - `AICTRONICS_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".aictronics";
const DEFAULT_CART_KEY: &str = "aictronics-cart";
const MAX_CART_KEY_LENGTH: usize = 64;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the durable cart store
    pub data_dir: PathBuf,
    /// Key the cart snapshot is stored under
    pub cart_key: String,
    /// Optional catalog file; the built-in catalog is used when absent
    pub catalog_path: Option<PathBuf>,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            catalog_path: None,
            log_format: LogFormat::Pretty,
            sentry_dsn: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = non_empty("AICTRONICS_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let cart_key =
            non_empty("AICTRONICS_CART_KEY").unwrap_or_else(|| DEFAULT_CART_KEY.to_string());
        validate_cart_key(&cart_key, "AICTRONICS_CART_KEY")?;

        let catalog_path = non_empty("AICTRONICS_CATALOG_PATH").map(PathBuf::from);

        let log_format = non_empty("AICTRONICS_LOG_FORMAT")
            .map(|value| value.parse::<LogFormat>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("AICTRONICS_LOG_FORMAT".to_string(), e))?
            .unwrap_or_default();

        let sentry_dsn = non_empty("SENTRY_DSN");

        Ok(Self {
            data_dir,
            cart_key,
            catalog_path,
            log_format,
            sentry_dsn,
        })
    }
}

/// The cart key becomes a file name, so keep it to a safe alphabet.
fn validate_cart_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if key.len() > MAX_CART_KEY_LENGTH {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be at most {MAX_CART_KEY_LENGTH} characters"),
        ));
    }
    if key.starts_with('.') {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not start with '.'".to_string(),
        ));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("contains unsupported character '{bad}'"),
        ));
    }
    Ok(())
}
