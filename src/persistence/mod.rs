//! Game data persistence
//!
//! - `record`: the persisted document (high score, totals, history, prefs)
//! - `store`: JSON file and in-memory backends
//! - [`SessionRecorder`]: writes finished games to a store

pub mod record;
pub mod store;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

pub use record::{DataRecord, SavedPreferences, SessionRecord, Statistics};
pub use store::{DATA_FILE, JsonDataStore, MemoryStore, backup_path};

use crate::sim::{GameEvent, SessionSummary};

/// Data file read/write failure
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "data file I/O error: {e}"),
            StoreError::Parse(e) => write!(f, "data file parse error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e)
    }
}

/// Access to the persisted game data.
///
/// Backends provide storage; every mutating operation flushes once it has
/// changed something.
pub trait PersistenceStore {
    fn data(&self) -> &DataRecord;
    fn data_mut(&mut self) -> &mut DataRecord;
    /// Write the current data to the backing storage
    fn flush(&mut self) -> Result<(), StoreError>;

    /// Returns true (and persists) only if `score` beats the stored record
    fn update_high_score(&mut self, score: u64) -> Result<bool, StoreError> {
        if self.data_mut().update_high_score(score) {
            self.flush()?;
            log::info!("New high score: {score}");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Append a finished game, timestamped now
    fn add_game_session(&mut self, summary: &SessionSummary) -> Result<(), StoreError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.data_mut()
            .add_session(SessionRecord::from_summary(summary, timestamp));
        self.flush()
    }

    fn get_statistics(&self) -> Statistics {
        self.data().statistics()
    }

    fn save_settings(&mut self, sound_enabled: bool) -> Result<(), StoreError> {
        self.data_mut().settings.sound_enabled = sound_enabled;
        self.flush()
    }

    fn load_settings(&self) -> SavedPreferences {
        self.data().settings.clone()
    }

    /// Clear everything except the saved preferences
    fn reset_data(&mut self) -> Result<(), StoreError> {
        self.data_mut().reset();
        log::info!("Game data reset");
        self.flush()
    }
}

/// Event subscriber that records every finished game
#[derive(Debug)]
pub struct SessionRecorder<S: PersistenceStore> {
    store: S,
}

impl<S: PersistenceStore> SessionRecorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Persist the session on `GameOver`; every other event is ignored.
    /// Failures are logged and the game carries on.
    pub fn handle_event(&mut self, event: &GameEvent) {
        let GameEvent::GameOver(summary) = event else {
            return;
        };

        if let Err(e) = self.store.add_game_session(summary) {
            log::warn!("Could not record session: {e}");
        }
        if let Err(e) = self.store.update_high_score(summary.score) {
            log::warn!("Could not save high score: {e}");
        }
    }
}
