//! Configuration structures for the Giotto client.
//!
//! This module provides TOML-based configuration with:
//! - Bundled defaults (include_str! from giotto.toml)
//! - User overrides (./giotto.toml or ~/.config/giotto/giotto.toml)
//! - Automatic merging with user values taking precedence

use crate::RetryPolicy;
use config::{Config, File, FileFormat};
use giotto_cache::ResponseCacheConfig;
use giotto_error::{ConfigError, GiottoError, GiottoResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Retry schedule settings.
///
/// ```toml
/// [retry]
/// max_retries = 5
/// base_delay_secs = 2
/// max_delay_secs = 60
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Maximum retries after the initial attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay in seconds
    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: u64,

    /// Cap on any single backoff delay in seconds
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,
}

fn default_max_retries() -> u32 {
    5
}

fn default_base_delay_secs() -> u64 {
    2
}

fn default_max_delay_secs() -> u64 {
    60
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_secs: default_base_delay_secs(),
            max_delay_secs: default_max_delay_secs(),
        }
    }
}

impl RetryConfig {
    /// Build the retry policy these settings describe.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_secs(self.base_delay_secs),
            Duration::from_secs(self.max_delay_secs),
        )
    }
}

/// Sliding-window ceilings.
///
/// ```toml
/// [windows]
/// per_minute = 5
/// per_hour = 100
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowConfig {
    /// Requests permitted per minute
    #[serde(default = "default_per_minute")]
    pub per_minute: usize,

    /// Requests permitted per hour
    #[serde(default = "default_per_hour")]
    pub per_hour: usize,
}

fn default_per_minute() -> usize {
    5
}

fn default_per_hour() -> usize {
    100
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            per_minute: default_per_minute(),
            per_hour: default_per_hour(),
        }
    }
}

/// Service endpoints and token handling.
///
/// ```toml
/// [watsonx]
/// base_url = "https://us-south.ml.cloud.ibm.com/ml/v1"
/// iam_url = "https://iam.cloud.ibm.com/identity/token"
/// version = "2021-05-01"
/// token_safety_margin_secs = 300
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WatsonxApiConfig {
    /// Base URL of the machine learning service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Identity endpoint for the credential exchange
    #[serde(default = "default_iam_url")]
    pub iam_url: String,

    /// API version query parameter
    #[serde(default = "default_version")]
    pub version: String,

    /// Seconds before nominal expiry at which a token counts as stale
    #[serde(default = "default_token_safety_margin_secs")]
    pub token_safety_margin_secs: u64,
}

fn default_base_url() -> String {
    "https://us-south.ml.cloud.ibm.com/ml/v1".to_string()
}

fn default_iam_url() -> String {
    "https://iam.cloud.ibm.com/identity/token".to_string()
}

fn default_version() -> String {
    "2021-05-01".to_string()
}

fn default_token_safety_margin_secs() -> u64 {
    300
}

impl Default for WatsonxApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            iam_url: default_iam_url(),
            version: default_version(),
            token_safety_margin_secs: default_token_safety_margin_secs(),
        }
    }
}

impl WatsonxApiConfig {
    /// Safety margin as a duration.
    pub fn token_safety_margin(&self) -> Duration {
        Duration::from_secs(self.token_safety_margin_secs)
    }
}

/// Top-level Giotto configuration.
///
/// Loads from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from giotto.toml)
/// 2. User override (~/.config/giotto/giotto.toml)
/// 3. User override (./giotto.toml)
///
/// # Example
///
/// ```no_run
/// use giotto_rate_limit::GiottoConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GiottoConfig::load()?;
/// assert_eq!(config.retry.max_retries, 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct GiottoConfig {
    /// Retry schedule settings
    #[serde(default)]
    pub retry: RetryConfig,

    /// Sliding-window ceilings
    #[serde(default)]
    pub windows: WindowConfig,

    /// Service endpoints and token handling
    #[serde(default)]
    pub watsonx: WatsonxApiConfig,

    /// Response cache settings
    #[serde(default)]
    pub cache: ResponseCacheConfig,
}

impl GiottoConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> GiottoResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                GiottoError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                GiottoError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> GiottoResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../giotto.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/giotto/giotto.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("giotto").required(false));

        builder
            .build()
            .map_err(|e| {
                GiottoError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                GiottoError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
