//! Game configuration
//!
//! Persisted as nested JSON (`config.json`). Files written by older or newer
//! builds are merged key-by-key over the built-in defaults, so a partial file
//! never leaves a field unset.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default config file name
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    pub bg_color: [u8; 3],
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            bg_color: [57, 197, 187],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipConfig {
    pub speed: f32,
    /// Ships per game
    pub limit: u32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self { speed: 1.5, limit: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletConfig {
    pub width: f32,
    pub height: f32,
    pub color: [u8; 3],
    /// Pixels per tick. Much faster than ship/alien speeds; kept as shipped.
    pub speed: f32,
    /// Live bullets allowed at once
    pub allowed: usize,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            width: 3.0,
            height: 15.0,
            color: [60, 60, 60],
            speed: 25.0,
            allowed: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlienConfig {
    pub speed: f32,
    /// Vertical drop applied to the whole fleet on each edge contact
    pub drop_speed: f32,
    pub points: u32,
}

impl Default for AlienConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            drop_speed: 10.0,
            points: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Multiplier for ship, bullet and alien speed per cleared wave
    pub speedup_scale: f32,
    /// Multiplier for alien points per cleared wave
    pub score_scale: f32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            speedup_scale: 1.1,
            score_scale: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundConfig {
    pub enabled: bool,
    pub music_volume: f32,
    pub effects_volume: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            music_volume: 0.3,
            effects_volume: 0.6,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub ship: ShipConfig,
    pub bullet: BulletConfig,
    pub alien: AlienConfig,
    pub game: ProgressionConfig,
    pub sound: SoundConfig,
}

impl GameConfig {
    /// Parse a config document, filling anything missing from the defaults.
    pub fn from_json_merged(json: &str) -> Result<Self, ConfigError> {
        let loaded: Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Self::default())?;
        merge_values(&mut merged, loaded);
        Ok(serde_json::from_value(merged)?)
    }
}

/// Merge `overlay` into `base`. Objects merge key-by-key, anything else is
/// replaced. Keys that `base` doesn't know are dropped.
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                if let Some(slot) = base_map.get_mut(&key) {
                    if slot.is_object() && value.is_object() {
                        merge_values(slot, value);
                    } else {
                        *slot = value;
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Config read/write failure
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// File-backed configuration store
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config. Never fails: a missing file is created with the
    /// defaults, an unreadable or malformed one falls back to them.
    pub fn load(&self) -> GameConfig {
        if !self.path.exists() {
            let config = GameConfig::default();
            match self.save(&config) {
                Ok(()) => log::info!("Created default config at {}", self.path.display()),
                Err(e) => log::warn!("Could not create {}: {e}", self.path.display()),
            }
            return config;
        }

        match self.try_load() {
            Ok(config) => {
                log::info!("Loaded config from {}", self.path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default config ({e})");
                GameConfig::default()
            }
        }
    }

    /// Load the config, reporting failures instead of substituting defaults
    pub fn try_load(&self) -> Result<GameConfig, ConfigError> {
        let json = fs::read_to_string(&self.path)?;
        GameConfig::from_json_merged(&json)
    }

    /// Re-read the file from disk, keeping `current` if that fails
    pub fn reload(&self, current: &GameConfig) -> GameConfig {
        match self.try_load() {
            Ok(config) => {
                log::info!("Reloaded config from {}", self.path.display());
                config
            }
            Err(e) => {
                log::warn!("Config reload failed, keeping current values ({e})");
                current.clone()
            }
        }
    }

    /// Write the config as pretty JSON
    pub fn save(&self, config: &GameConfig) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)?;
        log::debug!("Config saved to {}", self.path.display());
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("alien_invasion_config_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir.join(CONFIG_FILE)
    }

    #[test]
    fn test_defaults_match_shipped_values() {
        let config = GameConfig::default();
        assert_eq!(config.screen.width, 1200);
        assert_eq!(config.screen.height, 800);
        assert_eq!(config.bullet.speed, 25.0);
        assert_eq!(config.bullet.allowed, 10);
        assert_eq!(config.alien.points, 50);
        assert_eq!(config.ship.limit, 3);
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let json = r#"{ "ship": { "speed": 3.0 }, "alien": { "points": 75 } }"#;
        let config = GameConfig::from_json_merged(json).unwrap();
        assert_eq!(config.ship.speed, 3.0);
        // Sibling leaf kept from defaults
        assert_eq!(config.ship.limit, 3);
        assert_eq!(config.alien.points, 75);
        assert_eq!(config.alien.drop_speed, 10.0);
        assert_eq!(config.bullet, BulletConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let json = r#"{ "cheats": { "god_mode": true }, "screen": { "fullscreen": true } }"#;
        let config = GameConfig::from_json_merged(json).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_wrong_type_is_a_parse_error() {
        let json = r#"{ "ship": { "limit": "three" } }"#;
        assert!(matches!(
            GameConfig::from_json_merged(json),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_created() {
        let path = temp_path("missing");
        let store = ConfigStore::new(&path);
        let config = store.load();
        assert_eq!(config, GameConfig::default());
        assert!(path.exists());
        assert_eq!(store.try_load().unwrap(), config);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        let store = ConfigStore::new(&path);
        assert!(store.try_load().is_err());
        assert_eq!(store.load(), GameConfig::default());
    }

    #[test]
    fn test_reload_picks_up_edits() {
        let path = temp_path("reload");
        let store = ConfigStore::new(&path);
        let current = store.load();
        fs::write(&path, r#"{ "alien": { "speed": 2.5 } }"#).unwrap();
        let reloaded = store.reload(&current);
        assert_eq!(reloaded.alien.speed, 2.5);

        fs::write(&path, "garbage").unwrap();
        assert_eq!(store.reload(&reloaded), reloaded);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let store = ConfigStore::new(&path);
        let mut config = GameConfig::default();
        config.sound.enabled = false;
        config.game.speedup_scale = 1.25;
        store.save(&config).unwrap();
        assert_eq!(store.load(), config);
    }
}
