//! Configuration module for the GEX engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation. Every section has defaults, so an absent or empty file
//! yields a runnable configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gex_engine::config::load_config;
//!
//! // Load from default path (gex.yaml)
//! let config = load_config(None)?;
//!
//! println!("Spot: {}", config.market.spot);
//! ```

mod columns;
mod input;
mod market;
mod observability;
mod output;
mod parsing;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use columns::ColumnMapping;
pub use input::InputConfig;
pub use market::MarketConfig;
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use output::OutputConfig;
pub use parsing::ParsingConfig;

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "gex.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input workbook configuration.
    pub input: InputConfig,
    /// Market context for the gamma calculation.
    pub market: MarketConfig,
    /// Column label mapping.
    pub columns: ColumnMapping,
    /// Numeric parsing policy.
    pub parsing: ParsingConfig,
    /// Artifact locations.
    pub output: OutputConfig,
    /// Observability configuration.
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "gex.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration, falling back to defaults when the default file is absent.
///
/// An explicitly named file must exist; only the implicit `gex.yaml` may be
/// missing.
pub fn load_config_or_default(path: Option<&str>) -> Result<Config, ConfigError> {
    match path {
        Some(explicit) => load_config(Some(explicit)),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(None),
        None => {
            let config = Config::default();
            validate_config(&config)?;
            Ok(config)
        }
    }
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let market = &config.market;

    let finite = [
        ("market.spot", market.spot),
        ("market.implied_volatility", market.implied_volatility),
        ("market.multiplier", market.multiplier),
        ("market.time_to_expiry_years", market.time_to_expiry_years),
        ("market.risk_free_rate", market.risk_free_rate),
    ];
    if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
        return Err(ConfigError::ValidationError(format!(
            "{name} must be a finite number"
        )));
    }

    if market.spot <= 0.0 {
        return Err(ConfigError::ValidationError(
            "market.spot must be positive".to_string(),
        ));
    }

    if market.implied_volatility <= 0.0 {
        return Err(ConfigError::ValidationError(
            "market.implied_volatility must be positive".to_string(),
        ));
    }

    if market.multiplier <= 0.0 {
        return Err(ConfigError::ValidationError(
            "market.multiplier must be positive".to_string(),
        ));
    }

    if market.expiration_date < market.valuation_date {
        return Err(ConfigError::ValidationError(
            "market.expiration_date must not precede market.valuation_date".to_string(),
        ));
    }

    let columns = &config.columns;
    if [&columns.month, &columns.strike, &columns.open_interest]
        .iter()
        .any(|label| label.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(
            "column labels must not be empty".to_string(),
        ));
    }

    let valid_formats = ["full", "compact"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}
