//! Configuration management for the ustaz client
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default REST API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Cairo, used when no position is known
pub const DEFAULT_LAT: f64 = 30.0444;
pub const DEFAULT_LNG: f64 = 31.2357;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// REST API configuration
    pub api: ApiConfig,

    /// Map widget configuration
    pub map: MapConfig,

    /// Geolocation configuration
    pub geolocation: GeolocationConfig,

    /// Local persistence configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    pub base_url: String,

    /// Client-wide request timeout in seconds
    pub timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            user_agent: format!("ustaz/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Map widget configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Tile provider token; the map mounts as a placeholder without it
    pub access_token: Option<String>,

    /// Style URL handed to the map surface
    pub style: String,

    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,

    /// Zoom above which points are no longer clustered
    pub cluster_max_zoom: u8,

    /// Cluster radius in pixels
    pub cluster_radius: u16,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            style: String::from("mapbox://styles/mapbox/streets-v12"),
            default_center_lat: DEFAULT_LAT,
            default_center_lng: DEFAULT_LNG,
            default_zoom: 13.0,
            cluster_max_zoom: 14,
            cluster_radius: 50,
        }
    }
}

/// Geolocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    /// One-shot request timeout in seconds
    pub timeout_secs: u64,

    /// Age below which a cached one-shot fix is reused
    pub max_age_secs: u64,

    /// Cache tolerance of watch updates
    pub watch_max_age_secs: u64,

    /// Position reported whenever acquisition fails
    pub fallback_lat: f64,
    pub fallback_lng: f64,

    /// Fixed position for hosts without a positioning device
    pub fixed_lat: Option<f64>,
    pub fixed_lng: Option<f64>,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_age_secs: 300,
            watch_max_age_secs: 60,
            fallback_lat: DEFAULT_LAT,
            fallback_lng: DEFAULT_LNG,
            fixed_lat: None,
            fixed_lng: None,
        }
    }
}

impl GeolocationConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fixed position when both coordinates are configured
    pub fn fixed_position(&self) -> Option<(f64, f64)> {
        self.fixed_lat.zip(self.fixed_lng)
    }
}

/// Local persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per persisted key
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".ustaz"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = std::env::var("USTAZ_API_URL").unwrap_or(defaults.api.base_url);

        let timeout_secs = std::env::var("USTAZ_API_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.api.timeout_secs);

        let access_token = std::env::var("USTAZ_MAP_TOKEN")
            .or_else(|_| std::env::var("MAPBOX_TOKEN"))
            .ok()
            .filter(|token| !token.trim().is_empty());

        let storage_dir = std::env::var("USTAZ_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage.dir);

        let fixed_lat = std::env::var("USTAZ_LAT")
            .ok()
            .and_then(|v| v.parse::<f64>().ok());
        let fixed_lng = std::env::var("USTAZ_LNG")
            .ok()
            .and_then(|v| v.parse::<f64>().ok());

        let log_level = std::env::var("USTAZ_LOG_LEVEL").unwrap_or(defaults.logging.level);

        let log_format = std::env::var("USTAZ_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            api: ApiConfig {
                base_url,
                timeout_secs,
                user_agent: defaults.api.user_agent,
            },
            map: MapConfig {
                access_token,
                ..defaults.map
            },
            geolocation: GeolocationConfig {
                fixed_lat,
                fixed_lng,
                ..defaults.geolocation
            },
            storage: StorageConfig { dir: storage_dir },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("api.base_url is not a valid URL: {}", self.api.base_url))?;

        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than 0");
        }

        if self.geolocation.timeout_secs == 0 {
            anyhow::bail!("geolocation.timeout_secs must be greater than 0");
        }

        if !(-90.0..=90.0).contains(&self.geolocation.fallback_lat)
            || !(-180.0..=180.0).contains(&self.geolocation.fallback_lng)
        {
            anyhow::bail!("geolocation fallback position is out of range");
        }

        if self.geolocation.fixed_lat.is_some() != self.geolocation.fixed_lng.is_some() {
            anyhow::bail!("geolocation.fixed_lat and fixed_lng must be set together");
        }

        if !(0.0..=24.0).contains(&self.map.default_zoom) {
            anyhow::bail!("map.default_zoom must be between 0 and 24");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging.format must be 'text' or 'json'");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}
