//! Frame output
//!
//! A [`Renderer`] is handed the full game state once per presented frame.
//! The headless build ships [`HudLogger`], which writes a HUD line to the log
//! whenever something on it changes besides the score.

use crate::sim::{GamePhase, GameState};

/// Presents the game state
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub ships_left: u32,
    pub phase: GamePhase,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.stats.score,
            high_score: state.stats.high_score,
            level: state.stats.level,
            ships_left: state.stats.ships_left,
            phase: state.phase,
        }
    }

    /// Same level, ships and phase (score changes alone don't count)
    fn same_layout(&self, other: &Self) -> bool {
        self.level == other.level
            && self.ships_left == other.ships_left
            && self.phase == other.phase
    }
}

impl std::fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:?}] score {} | high {} | level {} | ships {}",
            self.phase,
            format_score(self.score),
            format_score(self.high_score),
            self.level,
            self.ships_left
        )
    }
}

/// Score with thousands separators
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Logs the HUD on level, ship count or phase changes
#[derive(Debug, Default)]
pub struct HudLogger {
    last: Option<HudSnapshot>,
    lines_written: usize,
}

impl HudLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }
}

impl Renderer for HudLogger {
    fn render(&mut self, state: &GameState) {
        let hud = HudSnapshot::from_state(state);
        if self.last.is_some_and(|last| last.same_layout(&hud)) {
            return;
        }
        log::info!("{hud}");
        self.last = Some(hud);
        self.lines_written += 1;
    }
}
