//! Game state and core simulation types
//!
//! Everything one game session mutates lives in [`GameState`]. It is owned by
//! the orchestrator for the whole tick; collaborators only ever see it by
//! shared reference or through the events drained at the end of a tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::fleet::Fleet;
use super::projectiles::ProjectilePool;
use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::*;
use crate::settings::Settings;

/// Top-level phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first game (title screen)
    #[default]
    Inactive,
    /// Simulation running
    Active,
    /// Simulation frozen by the player (pause / settings panel)
    Paused,
    /// Last ship lost; waiting for a new game
    GameOver,
}

impl GamePhase {
    /// Whether a `start` intent begins a new game in this phase
    pub fn accepts_start(self) -> bool {
        matches!(self, GamePhase::Inactive | GamePhase::GameOver)
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Top-left corner (true position)
    pub pos: Vec2,
    pub size: Vec2,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// Create a ship centered on the bottom edge of the screen
    pub fn new(screen_w: f32, screen_h: f32) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(SHIP_WIDTH, SHIP_HEIGHT),
            moving_left: false,
            moving_right: false,
        };
        ship.center(screen_w, screen_h);
        ship
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, self.size)
    }

    /// Put the ship back at the bottom center
    pub fn center(&mut self, screen_w: f32, screen_h: f32) {
        let x = ((screen_w - self.size.x) / 2.0).floor();
        self.pos = Vec2::new(x.max(0.0), screen_h - self.size.y);
    }

    /// Midpoint of the ship's top edge (projectile spawn point)
    pub fn nose(&self) -> Vec2 {
        let rect = self.rect();
        Vec2::new(rect.x as f32 + rect.w as f32 / 2.0, rect.top() as f32)
    }

    /// Apply movement intents for one tick, keeping the ship on screen
    pub fn update(&mut self, speed: f32, screen_w: f32) {
        if self.moving_right {
            self.pos.x += speed;
        }
        if self.moving_left {
            self.pos.x -= speed;
        }
        let max_x = (screen_w - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}

/// A player projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner (true position)
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward speed in pixels per tick
    pub speed: f32,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.y -= self.speed;
    }

    /// Fully above the top of the screen
    pub fn is_off_screen(&self) -> bool {
        self.rect().bottom() <= 0
    }
}

/// A single enemy in the fleet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner (true position, accumulates sub-pixel motion)
    pub pos: Vec2,
    pub size: Vec2,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, self.size)
    }
}

/// Everything the game over screen and the stats store need about a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u64,
    pub level: u32,
    pub aliens_killed: u32,
    pub bullets_fired: u32,
    pub ships_left: u32,
    /// Score beat the high score held when the game started
    pub new_high_score: bool,
}

/// Domain events emitted during a tick, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game began
    GameStarted,
    /// A projectile was spawned
    ShotFired,
    /// One collision batch removed `count` enemies worth `points` in total
    EnemyDestroyed { count: u32, points: u64 },
    /// The fleet was wiped out; `level` is the level that was cleared
    WaveCleared { level: u32 },
    /// Difficulty went up; `level` is the new level
    LevelUp { level: u32 },
    /// The ship was hit or the fleet reached the floor
    ShipHit { ships_left: u32 },
    /// No ships left
    GameOver(SessionSummary),
}

/// Session statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u64,
    pub level: u32,
    pub bullets_fired: u32,
    pub aliens_killed: u32,
    /// Best score across sessions (tracks the live score once beaten)
    pub high_score: u64,
    /// High score as it stood when the current game started
    pub high_score_at_start: u64,
}

impl GameStats {
    pub fn new(ship_limit: u32, high_score: u64) -> Self {
        Self {
            ships_left: ship_limit,
            score: 0,
            level: 1,
            bullets_fired: 0,
            aliens_killed: 0,
            high_score,
            high_score_at_start: high_score,
        }
    }

    /// Reset per-game counters. The high score is never reset here.
    pub fn reset(&mut self, ship_limit: u32) {
        *self = Self::new(ship_limit, self.high_score);
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            level: self.level,
            aliens_killed: self.aliens_killed,
            bullets_fired: self.bullets_fired,
            ships_left: self.ships_left,
            new_high_score: self.score > self.high_score_at_start,
        }
    }
}

/// Complete state of one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Config baseline the dynamic settings reset to
    pub config: GameConfig,
    /// Dynamic settings (scaled per wave)
    pub settings: Settings,
    pub stats: GameStats,
    pub phase: GamePhase,
    /// Simulation ticks advanced while active
    pub time_ticks: u64,
    /// Remaining ticks of the post-life-loss freeze
    pub freeze_ticks: u32,
    pub ship: Ship,
    pub projectiles: ProjectilePool,
    pub fleet: Fleet,
    /// Events produced this tick
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create the idle state shown before the first game
    pub fn new(config: GameConfig, high_score: u64) -> Self {
        let settings = Settings::from_config(&config);
        let stats = GameStats::new(settings.ship_limit, high_score);
        let ship = Ship::new(settings.screen_width, settings.screen_height);
        let mut fleet = Fleet::new();
        fleet.relayout(settings.screen_width, settings.screen_height);

        Self {
            config,
            settings,
            stats,
            phase: GamePhase::Inactive,
            time_ticks: 0,
            freeze_ticks: 0,
            ship,
            projectiles: ProjectilePool::new(),
            fleet,
            events: Vec::new(),
        }
    }

    /// Queue an event for this tick
    pub(crate) fn emit(&mut self, event: GameEvent) {
        log::debug!("event: {:?}", event);
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether ticks currently advance the world
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Active && self.freeze_ticks == 0
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), 0)
    }
}
