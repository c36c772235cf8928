use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::ValidationPolicy;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub progress: ProgressSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_artifact_path")]
    pub artifact_path: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
        }
    }
}

fn default_artifact_path() -> String { "models/laptop_price.json".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationSettings {
    #[serde(default)]
    pub policy: ValidationPolicy,
}

/// Cosmetic delay before each appraisal; `steps = 0` disables it
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProgressSettings {
    #[serde(default = "default_progress_steps")]
    pub steps: u32,
    #[serde(default = "default_progress_step_millis")]
    pub step_millis: u64,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            steps: default_progress_steps(),
            step_millis: default_progress_step_millis(),
        }
    }
}

fn default_progress_steps() -> u32 { 100 }
fn default_progress_step_millis() -> u64 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_currency_symbol() -> String { "₹".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with VALUATION__)
    /// 5. MODEL_ARTIFACT_PATH
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., VALUATION__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        apply_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("VALUATION")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply plain deployment variables on top of the layered config
fn apply_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(path) = std::env::var("MODEL_ARTIFACT_PATH") {
        builder = builder.set_override("model.artifact_path", path)?;
    }

    builder.build()
}
