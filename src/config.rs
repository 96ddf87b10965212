//! Configuration management for `SkyBrief`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::BriefingError;
use crate::decision::{FlightCategoryThresholds, OperatingLimits};
use crate::models::normalize_icao;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure for the `SkyBrief` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefingConfig {
    /// Weather source configuration
    pub sources: SourcesConfig,
    /// Flight category minimums
    pub thresholds: FlightCategoryThresholds,
    /// Aircraft crosswind/tailwind limits
    pub limits: OperatingLimits,
    /// Runway headings per ICAO code, in degrees
    pub runways: HashMap<String, Vec<f64>>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Settings shared by all weather sources plus one section per source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Per-source attempt timeout in seconds
    pub timeout_seconds: u64,
    /// Retries for transient HTTP failures
    pub max_retries: u32,
    pub checkwx: CheckWxConfig,
    pub metservice: MetServiceConfig,
    pub metno: MetNoConfig,
}

/// CheckWX settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckWxConfig {
    /// API key, the source is skipped without one
    pub api_key: Option<String>,
    pub base_url: String,
}

/// MetService NZ settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetServiceConfig {
    pub api_key: Option<String>,
    /// No public default; the source is skipped without one
    pub base_url: Option<String>,
    pub metar_path: String,
    pub taf_path: String,
}

/// MET Norway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetNoConfig {
    pub base_url: String,
    /// MET Norway rejects requests without an identifying User-Agent
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_timeout_seconds() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    1
}

fn default_checkwx_base_url() -> String {
    "https://api.checkwx.com".to_string()
}

fn default_metservice_metar_path() -> String {
    "/aviation/metar".to_string()
}

fn default_metservice_taf_path() -> String {
    "/aviation/taf".to_string()
}

fn default_metno_base_url() -> String {
    "https://api.met.no/weatherapi/tafmetar/1.0".to_string()
}

fn default_metno_user_agent() -> String {
    concat!(
        "skybrief/",
        env!("CARGO_PKG_VERSION"),
        " github.com/skybrief/skybrief"
    )
    .to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            checkwx: CheckWxConfig::default(),
            metservice: MetServiceConfig::default(),
            metno: MetNoConfig::default(),
        }
    }
}

impl Default for CheckWxConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_checkwx_base_url(),
        }
    }
}

impl Default for MetServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            metar_path: default_metservice_metar_path(),
            taf_path: default_metservice_taf_path(),
        }
    }
}

impl Default for MetNoConfig {
    fn default() -> Self {
        Self {
            base_url: default_metno_base_url(),
            user_agent: default_metno_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Treat blank strings from files/env as "not set"
fn non_blank(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = None;
    }
}

fn validate_url(name: &str, url: &str) -> Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(BriefingError::config(format!(
            "{name} base URL must be a valid HTTP or HTTPS URL, got '{url}'"
        ))
        .into());
    }
    Ok(())
}

impl BriefingConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SKYBRIEF_SOURCES__CHECKWX__API_KEY -> sources.checkwx.api_key
        builder = builder.add_source(
            Environment::with_prefix("SKYBRIEF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: BriefingConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skybrief").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.sources.timeout_seconds == 0 {
            self.sources.timeout_seconds = default_timeout_seconds();
        }
        non_blank(&mut self.sources.checkwx.api_key);
        if self.sources.checkwx.base_url.is_empty() {
            self.sources.checkwx.base_url = default_checkwx_base_url();
        }
        non_blank(&mut self.sources.metservice.api_key);
        non_blank(&mut self.sources.metservice.base_url);
        if self.sources.metservice.metar_path.is_empty() {
            self.sources.metservice.metar_path = default_metservice_metar_path();
        }
        if self.sources.metservice.taf_path.is_empty() {
            self.sources.metservice.taf_path = default_metservice_taf_path();
        }
        if self.sources.metno.base_url.is_empty() {
            self.sources.metno.base_url = default_metno_base_url();
        }
        if self.sources.metno.user_agent.trim().is_empty() {
            self.sources.metno.user_agent = default_metno_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }

        self.runways = std::mem::take(&mut self.runways)
            .into_iter()
            .map(|(icao, headings)| (icao.trim().to_uppercase(), headings))
            .collect();
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.thresholds
            .validate()
            .with_context(|| "Invalid flight category thresholds")?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_runways()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.sources.timeout_seconds > 120 {
            return Err(
                BriefingError::config("Weather source timeout cannot exceed 120 seconds").into(),
            );
        }

        if self.sources.max_retries > 5 {
            return Err(BriefingError::config("Weather source max retries cannot exceed 5").into());
        }

        for (name, limit) in [
            ("crosswind", self.limits.max_crosswind_kt),
            ("tailwind", self.limits.max_tailwind_kt),
        ] {
            if let Some(limit) = limit
                && (!limit.is_finite() || limit < 0.0)
            {
                return Err(BriefingError::config(format!(
                    "Maximum {name} must be a non-negative number of knots, got {limit}"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(BriefingError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(BriefingError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        validate_url("CheckWX", &self.sources.checkwx.base_url)?;
        if let Some(base_url) = &self.sources.metservice.base_url {
            validate_url("MetService", base_url)?;
        }
        validate_url("MET Norway", &self.sources.metno.base_url)?;

        Ok(())
    }

    /// Validate configured airports and runway headings
    fn validate_runways(&self) -> Result<()> {
        for (icao, headings) in &self.runways {
            normalize_icao(icao).with_context(|| format!("Invalid runway table entry '{icao}'"))?;
            if let Some(heading) = headings
                .iter()
                .find(|h| !h.is_finite() || **h < 0.0 || **h > 360.0)
            {
                return Err(BriefingError::config(format!(
                    "Runway heading {heading} for {icao} must be between 0 and 360 degrees"
                ))
                .into());
            }
        }
        Ok(())
    }
}
