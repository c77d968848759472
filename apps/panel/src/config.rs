//! Panel configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                 | Default        |
//! |--------------------------|----------------|
//! | `VITRINA_DB_PATH`        | `./vitrina.db` |
//! | `REDIS_URL`              | unset → in-process cache |
//! | `VITRINA_CACHE_TTL_SECS` | `60`           |
//! | `VITRINA_ASSET_DIR`      | `./uploads`    |
//! | `VITRINA_ASSET_BASE_URL` | `/uploads`     |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use vitrina_core::CACHE_TTL_SECS;

/// Panel configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Redis connection string (optional)
    pub redis_url: Option<String>,

    /// Lifetime of cached view fragments
    pub cache_ttl: Duration,

    /// Directory uploaded assets are written to
    pub asset_dir: PathBuf,

    /// URL prefix the asset directory is served under
    pub asset_base_url: String,
}

impl PanelConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let cache_ttl_secs: u64 = match var("VITRINA_CACHE_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("VITRINA_CACHE_TTL_SECS".to_string()))?,
            None => CACHE_TTL_SECS,
        };
        if cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue("VITRINA_CACHE_TTL_SECS".to_string()));
        }

        let asset_base_url = var("VITRINA_ASSET_BASE_URL").unwrap_or_else(|| "/uploads".to_string());
        if !(asset_base_url.starts_with('/')
            || asset_base_url.starts_with("http://")
            || asset_base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue("VITRINA_ASSET_BASE_URL".to_string()));
        }

        Ok(PanelConfig {
            db_path: var("VITRINA_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./vitrina.db")),

            redis_url: var("REDIS_URL"),

            cache_ttl: Duration::from_secs(cache_ttl_secs),

            asset_dir: var("VITRINA_ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),

            asset_base_url,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
