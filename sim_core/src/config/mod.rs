//! Configuration loading from TOML files

mod constants;
mod sim_config;

pub use constants::GameConstants;
pub use sim_config::{
    Consumables, GearPiece, PlayerConfig, RotationConfig, SelectedAuras, SetBonuses, Settings,
    SimConfig, Talents,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load and validate a simulation config from a file
pub fn load_sim_config(path: &Path) -> Result<SimConfig, ConfigError> {
    let config: SimConfig = load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate a simulation config from a string
pub fn parse_sim_config(content: &str) -> Result<SimConfig, ConfigError> {
    let config: SimConfig = parse_toml(content)?;
    config.validate()?;
    Ok(config)
}

/// The bundled example build
pub fn default_config() -> Result<SimConfig, ConfigError> {
    parse_sim_config(include_str!("../../config/default_build.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = default_config().unwrap();
        assert!(config.settings.iterations > 0);
        assert!(config.settings.min_fight_length > 0.0);
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let result = parse_sim_config("[player]\nrace = \"gnome\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
