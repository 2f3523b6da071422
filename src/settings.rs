//! Dynamic gameplay settings
//!
//! The values here change during a game (difficulty scale-up at each cleared
//! wave) and are reset from the [`GameConfig`] baseline whenever a new game
//! starts. They are owned by the game state, never global.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Horizontal fleet direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FleetDirection {
    #[default]
    Right,
    Left,
}

impl FleetDirection {
    /// Sign applied to horizontal fleet motion
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Right => 1.0,
            FleetDirection::Left => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Right => FleetDirection::Left,
            FleetDirection::Left => FleetDirection::Right,
        }
    }
}

/// Per-session gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub screen_width: f32,
    pub screen_height: f32,

    // === Ship ===
    pub ship_speed: f32,
    pub ship_limit: u32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub bullets_allowed: usize,

    // === Fleet ===
    pub alien_speed: f32,
    pub fleet_drop_speed: f32,
    pub fleet_direction: FleetDirection,
    pub alien_points: u32,

    // === Progression ===
    pub speedup_scale: f32,
    pub score_scale: f32,
}

impl Settings {
    /// Build the baseline settings for a new game
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            screen_width: config.screen.width as f32,
            screen_height: config.screen.height as f32,
            ship_speed: config.ship.speed,
            ship_limit: config.ship.limit,
            bullet_width: config.bullet.width,
            bullet_height: config.bullet.height,
            bullet_speed: config.bullet.speed,
            bullets_allowed: config.bullet.allowed,
            alien_speed: config.alien.speed,
            fleet_drop_speed: config.alien.drop_speed,
            fleet_direction: FleetDirection::Right,
            alien_points: config.alien.points,
            speedup_scale: config.game.speedup_scale,
            score_scale: config.game.score_scale,
        }
    }

    /// Restore the values that change during play to the config baseline
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::from_config(config);
    }

    /// Difficulty scale-up applied when a wave is cleared
    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;

        // Points truncate toward zero
        self.alien_points = (self.alien_points as f32 * self.score_scale) as u32;
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
