//! Fixed-rate tick pacing
//!
//! The simulation advances a fixed amount per tick, so the host decides how
//! many ticks are due from elapsed wall time. Long stalls are capped rather
//! than replayed all at once.

use std::time::Duration;

use crate::consts::SIM_HZ;

/// Seconds per simulation tick
pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;

/// Most ticks run for a single frame
pub const MAX_SUBSTEPS: u32 = 8;

/// Longest frame time considered (anything more is a stall)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedClock {
    accumulator: f32,
    /// Run one tick per call without waiting on wall time
    unthrottled: bool,
}

impl FixedClock {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            unthrottled: false,
        }
    }

    pub fn unthrottled() -> Self {
        Self {
            accumulator: 0.0,
            unthrottled: true,
        }
    }

    pub fn is_unthrottled(&self) -> bool {
        self.unthrottled
    }

    /// Feed elapsed frame time; returns how many ticks to run now
    pub fn ticks_due(&mut self, dt: f32) -> u32 {
        if self.unthrottled {
            return 1;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        ticks
    }

    /// How long the host can sleep before the next tick is due
    pub fn until_next_tick(&self) -> Duration {
        if self.unthrottled {
            return Duration::ZERO;
        }
        Duration::from_secs_f32((SIM_DT - self.accumulator).max(0.0))
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new()
    }
}
