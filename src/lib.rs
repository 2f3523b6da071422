//! Alien Invasion - a fixed-tick 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship, fleet, projectiles, progression)
//! - `config`: Nested game configuration with merge-over-defaults loading
//! - `settings`: Per-session dynamic gameplay values derived from the config
//! - `panel`: Settings panel apply/reset over config, game and sound
//! - `persistence`: High score, session history and aggregate statistics
//! - `audio`: Event-driven sound manager over a pluggable backend
//! - `platform`: Tick pacing and frame output seams

pub mod audio;
pub mod config;
pub mod panel;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use config::{ConfigStore, GameConfig};
pub use panel::{PanelSettings, apply_settings, reset_to_default};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate the core is tuned for (one tick of motion per call)
    pub const SIM_HZ: u32 = 60;

    /// Enemy sprite size in pixels
    pub const ALIEN_WIDTH: f32 = 60.0;
    pub const ALIEN_HEIGHT: f32 = 58.0;

    /// Ship sprite size in pixels
    pub const SHIP_WIDTH: f32 = 60.0;
    pub const SHIP_HEIGHT: f32 = 48.0;

    /// Input-frozen pause after losing a ship (0.5s at 60 Hz)
    pub const LIFE_LOSS_PAUSE_TICKS: u32 = SIM_HZ / 2;

    /// Session history entries kept in the data file
    pub const MAX_HISTORY: usize = 50;
    /// Sessions reported as "recent" in the statistics view
    pub const RECENT_GAMES: usize = 10;
}
