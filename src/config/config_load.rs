// src/config/config_load.rs
//
// loading to config.toml

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::config_types::{OutputConfig, SpeedConfig, StyleConfig, WindowConfig};
use crate::render::{Speed, SpeedError};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub style: StyleConfig,
    pub speed: SpeedConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&content)?;
        debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn load_from_exe_dir() -> Option<Self> {
        let exe_path = std::env::current_exe().ok()?;
        let exe_dir = exe_path.parent()?;
        let config_path = exe_dir.join(CONFIG_FILE);

        if config_path.exists() {
            Self::load_from(&config_path).ok()
        } else {
            None
        }
    }

    pub fn default_speed(&self) -> Result<Speed, SpeedError> {
        Speed::new(self.speed.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [window]
            width = 800
            height = 600

            [style]
            dot_size = 6.0
            pen_size = 3.0
            background = [0.1, 0.1, 0.1]
            ink = [0.9, 0.0, 0.0]

            [speed]
            default = 0

            [output]
            image_width = 300
            image_height = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.window.width, 800);
        assert_eq!(config.style.dot_size, 6.0);
        assert_eq!(config.style.ink, [0.9, 0.0, 0.0]);
        assert_eq!(config.default_speed(), Ok(Speed::INSTANT));
        assert_eq!(config.output.image_height, 100);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[style]\ndot_size = 2.0\n").unwrap();

        assert_eq!(config.style.dot_size, 2.0);
        assert_eq!(config.style.pen_size, 10.0);
        assert_eq!(config.window.width, 656);
        assert_eq!(config.default_speed(), Ok(Speed::FASTEST));
        assert_eq!(config.output.image_width, 420);
    }

    #[test]
    fn test_out_of_range_speed() {
        let config = Config::parse("[speed]\ndefault = 12\n").unwrap();
        assert_eq!(config.default_speed(), Err(SpeedError(12)));
    }

    #[test]
    fn test_malformed_config() {
        assert!(Config::parse("[window]\nwidth = \"wide\"\n").is_err());
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = Config::parse(include_str!("../../config.toml")).unwrap();
        assert!(config.default_speed().is_ok());
    }
}
