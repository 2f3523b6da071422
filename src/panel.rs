//! Settings panel
//!
//! The panel edits a handful of config values with sliders and a sound
//! checkbox. Applying writes them into the config baseline and the live
//! settings of the running game, forwards the audio values to the sound
//! manager and saves `config.json`.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::audio::{AudioBackend, SoundManager};
use crate::config::{ConfigError, ConfigStore, GameConfig};
use crate::sim::GameState;

pub const SHIP_SPEED_RANGE: RangeInclusive<f32> = 0.5..=3.0;
pub const BULLET_SPEED_RANGE: RangeInclusive<f32> = 1.0..=10.0;
pub const ALIEN_SPEED_RANGE: RangeInclusive<f32> = 0.5..=3.0;
pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Snap a slider value into its range
pub fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

/// Values the panel controls, as resolved from its widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub music_volume: f32,
    pub effects_volume: f32,
    pub sound_enabled: bool,
}

impl PanelSettings {
    /// Current panel values of a config
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            ship_speed: config.ship.speed,
            bullet_speed: config.bullet.speed,
            alien_speed: config.alien.speed,
            music_volume: config.sound.music_volume,
            effects_volume: config.sound.effects_volume,
            sound_enabled: config.sound.enabled,
        }
    }

    /// Snap every slider value into its range. A slider that was never moved
    /// keeps its initial value, so only call this for values a user set.
    pub fn clamped(&self) -> Self {
        Self {
            ship_speed: clamp_to(self.ship_speed, &SHIP_SPEED_RANGE),
            bullet_speed: clamp_to(self.bullet_speed, &BULLET_SPEED_RANGE),
            alien_speed: clamp_to(self.alien_speed, &ALIEN_SPEED_RANGE),
            music_volume: clamp_to(self.music_volume, &VOLUME_RANGE),
            effects_volume: clamp_to(self.effects_volume, &VOLUME_RANGE),
            sound_enabled: self.sound_enabled,
        }
    }
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl GameConfig {
    /// Write panel values into the config
    pub fn apply_panel(&mut self, values: &PanelSettings) {
        self.ship.speed = values.ship_speed;
        self.bullet.speed = values.bullet_speed;
        self.alien.speed = values.alien_speed;
        self.sound.music_volume = values.music_volume;
        self.sound.effects_volume = values.effects_volume;
        self.sound.enabled = values.sound_enabled;
    }
}

impl GameState {
    /// Take panel values as both the new-game baseline and the live speeds
    pub fn apply_panel(&mut self, values: &PanelSettings) {
        self.config.apply_panel(values);
        self.settings.ship_speed = values.ship_speed;
        self.settings.bullet_speed = values.bullet_speed;
        self.settings.alien_speed = values.alien_speed;
    }
}

impl<B: AudioBackend> SoundManager<B> {
    /// Forward the panel's volumes and sound checkbox
    pub fn apply_panel(&mut self, values: &PanelSettings) {
        self.set_music_volume(values.music_volume);
        self.set_effects_volume(values.effects_volume);
        if values.sound_enabled != self.is_enabled() {
            self.set_enabled(values.sound_enabled);
        }
    }
}

/// Apply the panel and save the resulting config.
///
/// Values are taken as given; clamping happens where a slider is moved. The
/// game and the sound manager are updated even when the save fails.
pub fn apply_settings<B: AudioBackend>(
    state: &mut GameState,
    sound: &mut SoundManager<B>,
    store: &ConfigStore,
    values: &PanelSettings,
) -> Result<(), ConfigError> {
    state.apply_panel(values);
    sound.apply_panel(values);
    log::info!(
        "Settings applied: ship {:.1}, bullet {:.1}, alien {:.1}, music {:.0}%, effects {:.0}%, sound {}",
        values.ship_speed,
        values.bullet_speed,
        values.alien_speed,
        values.music_volume * 100.0,
        values.effects_volume * 100.0,
        if values.sound_enabled { "on" } else { "off" }
    );
    store.save(&state.config)?;
    Ok(())
}

/// Put the built-in panel values back into the game. Nothing is saved until
/// the panel is applied.
pub fn reset_to_default(state: &mut GameState) -> PanelSettings {
    let values = PanelSettings::default();
    state.apply_panel(&values);
    log::info!("Settings reset to defaults");
    values
}
