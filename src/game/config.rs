use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: i32,
    /// Height of the game grid in cells
    pub grid_height: i32,
    /// Simulated seconds per tick
    pub tick_length: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 18,
            tick_length: 0.15,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Read a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations a `GameState` cannot be built from
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.tick_length.is_finite() && self.tick_length > 0.0,
            "tick length must be a positive number of seconds, got {}",
            self.tick_length
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.grid_height, 18);
        assert_eq!(config.tick_length, 0.15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 10);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 10);
        assert_eq!(config.tick_length, 0.15);
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert!(GameConfig::new(0, 18).validate().is_err());
        assert!(GameConfig::new(32, -1).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_tick_length() {
        let mut config = GameConfig::default();
        config.tick_length = 0.0;
        assert!(config.validate().is_err());
        config.tick_length = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "tick_length": 0.1 }"#).unwrap();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.grid_height, 18);
        assert_eq!(config.tick_length, 0.1);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("torus_snake_cfg_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "grid_width": 20, "grid_height": 12 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config, GameConfig::new(20, 12));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/torus_snake.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
