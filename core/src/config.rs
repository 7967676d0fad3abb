//! Configuration management for the Shamba farm records platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SHAMBA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Alert horizon configuration
    pub alerts: AlertsConfig,

    /// Display cap configuration
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertsConfig {
    /// Days ahead a health follow-up counts as due soon
    pub health_horizon_days: i64,

    /// Days ahead a pregnancy counts as due soon
    pub pregnancy_horizon_days: i64,

    /// Days ahead an unharvested season counts as due
    pub harvest_horizon_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Rows shown in recent-activity lists
    pub recent_limit: usize,

    /// Rows shown in per-record history lists
    pub history_limit: usize,

    /// Maximum rows returned by any listing
    pub page_limit: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SHAMBA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("alerts.health_horizon_days", 7)?
            .set_default("alerts.pregnancy_horizon_days", 14)?
            .set_default("alerts.harvest_horizon_days", 14)?
            .set_default("display.recent_limit", 5)?
            .set_default("display.history_limit", 10)?
            .set_default("display.page_limit", 100)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SHAMBA_ prefix)
            .add_source(
                Environment::with_prefix("SHAMBA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            alerts: AlertsConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            health_horizon_days: 7,
            pregnancy_horizon_days: 14,
            harvest_horizon_days: 14,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_limit: 5,
            history_limit: 10,
            page_limit: 100,
        }
    }
}
