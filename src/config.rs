//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. `config.toml` in the platform config directory, or the file given
//!    with `--config`
//! 3. Environment variables prefixed with `DUPSEEK_`, nested with `__`
//!    (e.g. `DUPSEEK_TICKER__SHUTDOWN_TIMEOUT_MS=2000`)
//! 4. Command-line flags, applied by the binaries on top of the result
//!
//! ```toml
//! [scan]
//! path = "."
//! max_depth = 0
//! format = "table"
//!
//! [ticker]
//! interval_ms = 1000
//! shutdown_timeout_ms = 1000
//! max_cleanup_ms = 2000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::{Cli, TickerCli};
use crate::output::OutputFormat;
use crate::ticker::{CleanupDelay, TickerSettings};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DUPSEEK_";

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider produced an invalid value.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    /// An explicitly requested file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// The configuration could not be rendered as TOML.
    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Duplicate scanner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Scan root.
    pub path: PathBuf,
    /// Recursion bound; `<= 0` is unlimited.
    pub max_depth: i64,
    /// Report format.
    pub format: OutputFormat,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            max_depth: 0,
            format: OutputFormat::Table,
        }
    }
}

/// Ticker service settings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Time between ticks.
    pub interval_ms: u64,
    /// How long shutdown waits for acknowledgement.
    pub shutdown_timeout_ms: u64,
    /// Exclusive upper bound of the random cleanup delay.
    pub max_cleanup_ms: u64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            shutdown_timeout_ms: 1000,
            max_cleanup_ms: 2000,
        }
    }
}

impl TickerConfig {
    /// Convert to the service's runtime settings.
    #[must_use]
    pub fn settings(&self) -> TickerSettings {
        TickerSettings {
            interval: Duration::from_millis(self.interval_ms.max(1)),
            shutdown_timeout: Duration::from_millis(self.shutdown_timeout_ms),
            cleanup: CleanupDelay::Random {
                max: Duration::from_millis(self.max_cleanup_ms),
            },
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Duplicate scanner settings.
    pub scan: ScanConfig,
    /// Ticker service settings.
    pub ticker: TickerConfig,
}

impl Config {
    /// Load the configuration from `path`, or from the default location.
    ///
    /// A missing default file is not an error; a missing explicit file is.
    /// An invalid value in any layer fails the whole load rather than
    /// falling back to defaults, so a configured scan root is never
    /// silently replaced by `.`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit file is missing or any layer
    /// holds an invalid value.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) if !p.exists() => return Err(ConfigError::NotFound(p.to_path_buf())),
            Some(p) => Some(p.to_path_buf()),
            None => Self::config_path(),
        };

        Self::figment(file.as_deref())
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Build the layered figment without extracting it.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            log::debug!("Reading configuration from {}", file.display());
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Render the configuration in the same TOML layout the loader reads.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Render`] if a value has no TOML representation.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupseek", "dupseek")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply `dupseek` command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.path {
            self.scan.path = path.clone();
        }
        if let Some(max_depth) = cli.max_depth {
            self.scan.max_depth = max_depth;
        }
        if let Some(format) = cli.format {
            self.scan.format = format;
        }
    }

    /// Apply `ticker` command-line overrides.
    pub fn apply_ticker_cli(&mut self, cli: &TickerCli) {
        if let Some(interval) = cli.interval_ms {
            self.ticker.interval_ms = interval;
        }
        if let Some(timeout) = cli.timeout_ms {
            self.ticker.shutdown_timeout_ms = timeout;
        }
        if let Some(max_cleanup) = cli.max_cleanup_ms {
            self.ticker.max_cleanup_ms = max_cleanup;
        }
    }
}
