//! Persisted game data
//!
//! One JSON document holds the all-time high score, running totals, a bounded
//! session history (newest first) and the saved preferences.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HISTORY, RECENT_GAMES};
use crate::sim::SessionSummary;

/// A finished game as stored in the history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRecord {
    /// Unix timestamp (seconds) when the game ended. 0 for entries written
    /// by older builds, which only stored `date`.
    pub timestamp: u64,
    /// Local date string from older data files, kept as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub score: u64,
    pub level: u32,
    pub aliens_killed: u32,
    pub bullets_fired: u32,
    pub ships_left: u32,
}

impl SessionRecord {
    pub fn from_summary(summary: &SessionSummary, timestamp: u64) -> Self {
        Self {
            timestamp,
            date: None,
            score: summary.score,
            level: summary.level,
            aliens_killed: summary.aliens_killed,
            bullets_fired: summary.bullets_fired,
            ships_left: summary.ships_left,
        }
    }
}

/// Preferences that survive a data reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedPreferences {
    pub sound_enabled: bool,
}

impl Default for SavedPreferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
        }
    }
}

/// Aggregated view shown on the statistics screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub high_score: u64,
    pub games_played: u32,
    pub average_score: u64,
    pub total_aliens_killed: u64,
    pub average_aliens_per_game: u64,
    /// Kills per shot as a percentage, one decimal
    pub accuracy: f64,
    pub best_level: u32,
    pub recent_games: Vec<SessionRecord>,
}

/// The whole data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataRecord {
    pub high_score: u64,
    pub games_played: u32,
    pub total_score: u64,
    pub total_aliens_killed: u64,
    pub total_bullets_fired: u64,
    pub best_level: u32,
    /// Newest first, at most `MAX_HISTORY` entries
    pub game_history: Vec<SessionRecord>,
    pub settings: SavedPreferences,
}

impl Default for DataRecord {
    fn default() -> Self {
        Self {
            high_score: 0,
            games_played: 0,
            total_score: 0,
            total_aliens_killed: 0,
            total_bullets_fired: 0,
            best_level: 1,
            game_history: Vec::new(),
            settings: SavedPreferences::default(),
        }
    }
}

impl DataRecord {
    /// Raise the high score if `score` beats it. Returns whether it did.
    pub fn update_high_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Record a finished game at the front of the history
    pub fn add_session(&mut self, session: SessionRecord) {
        self.games_played += 1;
        self.total_score += session.score;
        self.total_aliens_killed += u64::from(session.aliens_killed);
        self.total_bullets_fired += u64::from(session.bullets_fired);
        self.best_level = self.best_level.max(session.level);

        self.game_history.insert(0, session);
        self.game_history.truncate(MAX_HISTORY);
    }

    pub fn statistics(&self) -> Statistics {
        let (average_score, average_aliens) = if self.games_played > 0 {
            let games = f64::from(self.games_played);
            (
                (self.total_score as f64 / games).round() as u64,
                (self.total_aliens_killed as f64 / games).round() as u64,
            )
        } else {
            (0, 0)
        };

        let accuracy = if self.total_bullets_fired > 0 {
            let pct = self.total_aliens_killed as f64 / self.total_bullets_fired as f64 * 100.0;
            (pct * 10.0).round() / 10.0
        } else {
            0.0
        };

        Statistics {
            high_score: self.high_score,
            games_played: self.games_played,
            average_score,
            total_aliens_killed: self.total_aliens_killed,
            average_aliens_per_game: average_aliens,
            accuracy,
            best_level: self.best_level,
            recent_games: self
                .game_history
                .iter()
                .take(RECENT_GAMES)
                .cloned()
                .collect(),
        }
    }

    /// Clear scores, totals and history. Preferences are kept.
    pub fn reset(&mut self) {
        let settings = std::mem::take(&mut self.settings);
        *self = Self {
            settings,
            ..Self::default()
        };
    }
}
