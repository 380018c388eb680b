//! Configuration for shufflepix.
//!
//! Configuration is split in two, following how the server is deployed:
//!
//! - Process options (bind address, config file location, logging) come from
//!   the command line or environment variables with the `SHUFFLEPIX_` prefix.
//! - Pipeline options (image directory, dimension bounds, cache TTL, default
//!   scale method) come from a JSON configuration file so they can be edited
//!   next to the image collection without touching the service unit.
//!
//! # Environment Variables
//!
//! - `SHUFFLEPIX_HOST` - Server bind address (default: 0.0.0.0)
//! - `SHUFFLEPIX_PORT` - Server port (default: 3000)
//! - `SHUFFLEPIX_CONFIG` - Path to the JSON configuration file

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::transform::ScaleMethod;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

/// Smallest width or height a request may ask for.
pub const MIN_DIMENSION: u32 = 16;

/// Default maximum requestable width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 3840;

/// Default maximum requestable height in pixels.
pub const DEFAULT_MAX_HEIGHT: u32 = 2160;

/// Default pool cache time-to-live in hours.
pub const DEFAULT_CACHE_HOURS: u64 = 24;

// =============================================================================
// CLI Arguments
// =============================================================================

/// shufflepix - serves a random image, resized and filtered on the fly.
///
/// Picks a random image from a configured directory and returns it scaled to
/// the requested dimensions, optionally with a visual filter applied.
#[derive(Parser, Debug, Clone)]
#[command(name = "shufflepix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "SHUFFLEPIX_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "SHUFFLEPIX_PORT")]
    pub port: u16,

    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "SHUFFLEPIX_CONFIG")]
    pub config: PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Cli {
    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Pipeline configuration loaded from the JSON configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding the candidate images (and the pool cache record).
    pub images_dir: PathBuf,

    /// Maximum requestable width in pixels.
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Maximum requestable height in pixels.
    #[serde(default = "default_max_height")]
    pub max_height: u32,

    /// Pool cache time-to-live in hours.
    #[serde(default = "default_cache_hours")]
    pub cache_hours: u64,

    /// Scale method used when the request does not name one.
    #[serde(default)]
    pub scale_method: ScaleMethod,
}

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

fn default_max_height() -> u32 {
    DEFAULT_MAX_HEIGHT
}

fn default_cache_hours() -> u64 {
    DEFAULT_CACHE_HOURS
}

impl AppConfig {
    /// Load and validate the configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Unreadable`] if the file is missing or unreadable
    /// - [`ConfigError::Malformed`] if the contents are not valid JSON
    /// - [`ConfigError::Invalid`] if a value is out of range
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "images_dir must not be empty".to_string(),
            });
        }
        if self.max_width < MIN_DIMENSION {
            return Err(ConfigError::Invalid {
                reason: format!("max_width must be at least {}", MIN_DIMENSION),
            });
        }
        if self.max_height < MIN_DIMENSION {
            return Err(ConfigError::Invalid {
                reason: format!("max_height must be at least {}", MIN_DIMENSION),
            });
        }
        if self.cache_hours == 0 {
            return Err(ConfigError::Invalid {
                reason: "cache_hours must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
