//! Scoring, waves, difficulty and lives
//!
//! Phase transitions:
//! - `start_game`: Inactive | GameOver -> Active
//! - `wave_clear`: stays Active, level + 1
//! - `life_loss`: stays Active with a frozen pause, or -> GameOver

use super::collision::HitReport;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::LIFE_LOSS_PAUSE_TICKS;

impl GameState {
    /// Begin a new game from the config baseline
    pub fn start_game(&mut self) {
        self.settings.reset(&self.config);
        self.stats.reset(self.settings.ship_limit);
        self.projectiles.clear();
        self.fleet
            .relayout(self.settings.screen_width, self.settings.screen_height);
        self.ship
            .center(self.settings.screen_width, self.settings.screen_height);
        self.ship.moving_left = false;
        self.ship.moving_right = false;
        self.freeze_ticks = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Active;

        if self.fleet.is_empty() {
            log::warn!(
                "{}x{} screen has no room for a fleet",
                self.settings.screen_width,
                self.settings.screen_height
            );
        }
        log::info!(
            "New game: {} ships, {} enemies",
            self.stats.ships_left,
            self.fleet.len()
        );
        self.emit(GameEvent::GameStarted);
    }

    /// Credit one collision batch: points once per distinct enemy
    pub(crate) fn award_hits(&mut self, report: &HitReport) {
        let count = report.enemies_destroyed();
        if count == 0 {
            return;
        }

        let points = u64::from(self.settings.alien_points) * u64::from(count);
        self.stats.score += points;
        self.stats.aliens_killed += count;
        if self.stats.score > self.stats.high_score {
            self.stats.high_score = self.stats.score;
        }
        self.emit(GameEvent::EnemyDestroyed { count, points });
    }

    /// Fleet wiped out: new wave, faster and worth more
    pub(crate) fn wave_clear(&mut self) {
        let cleared = self.stats.level;
        self.projectiles.clear();
        self.fleet
            .relayout(self.settings.screen_width, self.settings.screen_height);
        self.settings.increase_speed();
        self.stats.level += 1;

        log::info!(
            "Wave {} cleared; level {} (alien speed {:.2}, {} pts)",
            cleared,
            self.stats.level,
            self.settings.alien_speed,
            self.settings.alien_points
        );
        self.emit(GameEvent::WaveCleared { level: cleared });
        self.emit(GameEvent::LevelUp {
            level: self.stats.level,
        });
    }

    /// Ship hit by an enemy, or the fleet reached the floor
    pub(crate) fn life_loss(&mut self) {
        self.stats.ships_left = self.stats.ships_left.saturating_sub(1);
        self.emit(GameEvent::ShipHit {
            ships_left: self.stats.ships_left,
        });

        if self.stats.ships_left > 0 {
            self.projectiles.clear();
            self.fleet
                .relayout(self.settings.screen_width, self.settings.screen_height);
            self.ship
                .center(self.settings.screen_width, self.settings.screen_height);
            self.freeze_ticks = LIFE_LOSS_PAUSE_TICKS;
            log::info!("Ship lost, {} left", self.stats.ships_left);
        } else {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.freeze_ticks = 0;
        self.ship.moving_left = false;
        self.ship.moving_right = false;
        if self.stats.score > self.stats.high_score {
            self.stats.high_score = self.stats.score;
        }

        let summary = self.stats.summary();
        log::info!(
            "Game over: score {} level {} ({} kills / {} shots){}",
            summary.score,
            summary.level,
            summary.aliens_killed,
            summary.bullets_fired,
            if summary.new_high_score {
                ", new high score!"
            } else {
                ""
            }
        );
        self.emit(GameEvent::GameOver(summary));
    }
}
