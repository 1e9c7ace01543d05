use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

// Re-export types
pub use self::types::{Config, DisplaySettings, OutputFormat, OutputSettings, UniverseSettings};
mod types;

/// Longest accepted pause between rendered generations.
pub const MAX_FRAME_DELAY_MS: u64 = 60_000;

// Config error handling
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Loads and validates a config file. `.json` files are read as JSON,
/// everything else as TOML.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    let config: Config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    debug!("Loaded config from {}: {:?}", path.display(), config);

    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let display = &config.display;
    if display.live_glyph == display.dead_glyph {
        return Err(ConfigError::ValidationError(
            "Live and dead glyphs must differ".to_string(),
        ));
    }
    if display.live_glyph.is_control() || display.dead_glyph.is_control() {
        return Err(ConfigError::ValidationError(
            "Glyphs cannot be control characters".to_string(),
        ));
    }
    if display.frame_delay_ms > MAX_FRAME_DELAY_MS {
        return Err(ConfigError::ValidationError(format!(
            "Frame delay cannot exceed {} ms",
            MAX_FRAME_DELAY_MS
        )));
    }

    let universe = &config.universe;
    if universe.seed.is_some() && universe.default_pattern.is_some() {
        return Err(ConfigError::ValidationError(
            "Set either universe.seed or universe.default_pattern, not both".to_string(),
        ));
    }

    Ok(())
}
