//! Demo autopilot
//!
//! Drives the ship for attract mode and headless runs. It reads the state and
//! produces the same `TickInput` a player would, so the simulation cannot tell
//! the difference. All randomness comes from a seeded PCG stream.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Default chance per tick of pulling the trigger while lined up
pub const DEFAULT_FIRE_CHANCE: f64 = 0.35;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    fire_chance: f64,
    /// Start a new game whenever one can be started
    pub auto_start: bool,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self::with_fire_chance(seed, DEFAULT_FIRE_CHANCE)
    }

    pub fn with_fire_chance(seed: u64, fire_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            fire_chance: fire_chance.clamp(0.0, 1.0),
            auto_start: true,
        }
    }

    /// Decide this tick's intents
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();

        match state.phase {
            GamePhase::Inactive | GamePhase::GameOver => {
                input.start = self.auto_start;
                return input;
            }
            GamePhase::Paused => return input,
            GamePhase::Active => {}
        }
        if !state.is_running() {
            return input;
        }

        let ship_x = state.ship.pos.x + state.ship.size.x / 2.0;

        // Lowest enemy first, nearest column on ties
        let target = state.fleet.iter().max_by(|a, b| {
            let da = (a.pos.x + a.size.x / 2.0 - ship_x).abs();
            let db = (b.pos.x + b.size.x / 2.0 - ship_x).abs();
            a.pos
                .y
                .total_cmp(&b.pos.y)
                .then_with(|| db.total_cmp(&da))
        });

        let Some(target) = target else {
            return input;
        };

        let dx = target.pos.x + target.size.x / 2.0 - ship_x;
        let deadzone = state.settings.ship_speed.max(1.0);
        if dx > deadzone {
            input.move_right = true;
        } else if dx < -deadzone {
            input.move_left = true;
        }

        let lined_up = dx.abs() < target.size.x / 2.0;
        let roll = self.rng.random_bool(self.fire_chance);
        input.fire = lined_up && roll;

        input
    }
}
