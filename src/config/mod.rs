use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::core::deck::PAIR_COUNT;
use crate::utils::{GameError, GameResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// How long a mismatched pair stays face up before it is hidden again.
    pub mismatch_delay_ms: u64,
    /// When true, the in-game reset action deals a fresh shuffle instead of
    /// replaying the same layout.
    pub reshuffle_on_reset: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: String,
    pub card_faces: Vec<String>,
    pub show_stats_in_header: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig {
                mismatch_delay_ms: 1000,
                reshuffle_on_reset: false,
            },
            ui: UiConfig {
                theme: "default".to_string(),
                card_faces: ["🍎", "🌙", "⭐", "🐟", "🎈", "🍀", "🔔", "🗝️"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                show_stats_in_header: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            // Create default config file
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GameError::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| GameError::configuration(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GameError::configuration(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .map_err(|e| GameError::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_content)
            .map_err(|e| GameError::configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        // Validate logging level
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(GameError::configuration("Invalid logging level")),
        }

        if self.game.mismatch_delay_ms == 0 {
            return Err(GameError::configuration(
                "Mismatch delay must be greater than 0",
            ));
        }

        if self.ui.card_faces.len() != PAIR_COUNT {
            return Err(GameError::configuration(format!(
                "Exactly {} card faces are required",
                PAIR_COUNT
            )));
        }
        let distinct: HashSet<&str> = self.ui.card_faces.iter().map(|s| s.as_str()).collect();
        if distinct.len() != PAIR_COUNT {
            return Err(GameError::configuration("Card faces must be distinct"));
        }

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(log_level) = cli_config.log_level {
            self.logging.level = log_level;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
        if let Some(theme) = cli_config.theme {
            self.ui.theme = theme;
        }
    }
}

// Configuration that can be overridden by CLI arguments
#[derive(Debug, Default)]
pub struct CliConfig {
    pub log_level: Option<String>,
    pub debug: bool,
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.game.mismatch_delay_ms, 1000);
        assert!(!config.game.reshuffle_on_reset);
        assert_eq!(config.ui.card_faces.len(), PAIR_COUNT);
        assert_eq!(config.ui.theme, "default");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Invalid logging level
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());

        // Zero delay
        config = Config::default();
        config.game.mismatch_delay_ms = 0;
        assert!(config.validate().is_err());

        // Wrong face count
        config = Config::default();
        config.ui.card_faces.pop();
        assert!(config.validate().is_err());

        // Duplicate faces
        config = Config::default();
        config.ui.card_faces[7] = config.ui.card_faces[0].clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let original_config = Config::default();
        original_config.save_to_file(&config_path).unwrap();

        let loaded_config = Config::from_file(&config_path).unwrap();

        assert_eq!(
            original_config.game.mismatch_delay_ms,
            loaded_config.game.mismatch_delay_ms
        );
        assert_eq!(original_config.ui.card_faces, loaded_config.ui.card_faces);
        assert_eq!(original_config.logging.level, loaded_config.logging.level);
    }

    #[test]
    fn test_missing_file_creates_default() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("missing.toml");

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.game.mismatch_delay_ms, 1000);
        assert!(config_path.exists());
    }

    #[test]
    fn test_cli_config_merge() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            log_level: Some("warn".to_string()),
            debug: false,
            theme: Some("dark".to_string()),
        };

        config.merge_with_cli(cli_config);

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.ui.theme, "dark");

        let mut config = Config::default();
        config.merge_with_cli(CliConfig {
            debug: true,
            ..Default::default()
        });
        assert_eq!(config.logging.level, "debug");
    }
}
