use crate::constants::{self, env_vars, upstream};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path, get_preferences_path};
use validation::{validate_base_url, validate_bind_address, validate_limits, validate_log_path};

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Primary Playtomic API base URL, without trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Base URL tried when the primary one fails.
    #[serde(default = "default_fallback_api_base_url")]
    pub fallback_api_base_url: String,
    /// Socket address the HTTP service listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for upstream requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Radius used for the per-region tenant search.
    #[serde(default = "default_search_radius")]
    pub search_radius_meters: u32,
    /// Number of upcoming days prefetched in the background. Zero disables warm-up.
    #[serde(default = "default_warm_up_days")]
    pub warm_up_days: u32,
}

fn default_api_base_url() -> String {
    upstream::PRIMARY_BASE_URL.to_string()
}

fn default_fallback_api_base_url() -> String {
    upstream::FALLBACK_BASE_URL.to_string()
}

fn default_bind_address() -> String {
    constants::DEFAULT_BIND_ADDRESS.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_search_radius() -> u32 {
    constants::DEFAULT_SEARCH_RADIUS_METERS
}

fn default_warm_up_days() -> u32 {
    constants::DEFAULT_WARM_UP_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            fallback_api_base_url: default_fallback_api_base_url(),
            bind_address: default_bind_address(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            search_radius_meters: default_search_radius(),
            warm_up_days: default_warm_up_days(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, built-in defaults are used.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `PADEL_API_BASE_URL` - Override primary API base URL
    /// - `PADEL_FALLBACK_API_BASE_URL` - Override fallback API base URL
    /// - `PADEL_BIND_ADDRESS` - Override HTTP bind address
    /// - `PADEL_LOG_FILE` - Override log file path
    /// - `PADEL_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AppError)` - Config file unreadable or validation failed
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            debug!("Loading configuration from {config_path}");
            Self::load_from_path(&config_path).await?
        } else {
            debug!("No configuration file at {config_path}, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `PADEL_*` environment variable overrides in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(env_vars::API_BASE_URL) {
            self.api_base_url = url;
        }

        if let Ok(url) = std::env::var(env_vars::FALLBACK_API_BASE_URL) {
            self.fallback_api_base_url = url;
        }

        if let Ok(bind_address) = std::env::var(env_vars::BIND_ADDRESS) {
            self.bind_address = bind_address;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_base_url("api_base_url", &self.api_base_url)?;
        validate_base_url("fallback_api_base_url", &self.fallback_api_base_url)?;
        validate_bind_address(&self.bind_address)?;
        validate_log_path(&self.log_file_path)?;
        validate_limits(self.http_timeout_seconds, self.search_radius_meters)
    }

    /// Base URLs in the order they are tried.
    pub fn base_urls(&self) -> Vec<String> {
        let mut urls = vec![self.api_base_url.clone()];
        if self.fallback_api_base_url != self.api_base_url {
            urls.push(self.fallback_api_base_url.clone());
        }
        urls
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Returns the path of the persisted preferences file.
    pub fn get_preferences_path() -> String {
        get_preferences_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and effective settings
    /// - Defaults are shown when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();
        let file_exists = Path::new(&config_path).exists();
        let config = Config::load().await?;

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        if !file_exists {
            println!("(Not created yet, showing defaults)");
        }
        println!("────────────────────────────────────");
        println!("API Base URLs:");
        println!("{} (primary)", config.api_base_url);
        println!("{} (fallback)", config.fallback_api_base_url);
        println!("────────────────────────────────────");
        println!("Bind Address:");
        println!("{}", config.bind_address);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Search Radius:");
        println!("{} meters", config.search_radius_meters);
        println!("────────────────────────────────────");
        println!("Warm-up Days:");
        println!("{}", config.warm_up_days);
        println!("────────────────────────────────────");
        println!("Preferences File:");
        println!("{}", get_preferences_path());
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/padel_slots.log");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        info!("Configuration saved to {path}");
        Ok(())
    }

    /// Loads configuration from a custom file path without applying overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
