//! Data store backends

use std::fs;
use std::path::{Path, PathBuf};

use super::record::DataRecord;
use super::{PersistenceStore, StoreError};

/// Default data file name
pub const DATA_FILE: &str = "game_data.json";

/// `DataRecord` persisted as pretty JSON on disk
#[derive(Debug)]
pub struct JsonDataStore {
    path: PathBuf,
    data: DataRecord,
}

impl JsonDataStore {
    /// Open the data file. Never fails: a missing file is created with
    /// defaults; an unreadable one is moved to `<name>.bak` and replaced by
    /// defaults in memory.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let data = if !path.exists() {
            let data = DataRecord::default();
            match write_record(&path, &data) {
                Ok(()) => log::info!("Created data file at {}", path.display()),
                Err(e) => log::warn!("Could not create {}: {e}", path.display()),
            }
            data
        } else {
            match read_record(&path) {
                Ok(data) => {
                    log::info!(
                        "Loaded game data: high score {}, {} games",
                        data.high_score,
                        data.games_played
                    );
                    data
                }
                Err(e) => {
                    log::warn!("Could not load game data, using defaults ({e})");
                    let backup = backup_path(&path);
                    match fs::rename(&path, &backup) {
                        Ok(()) => log::warn!("Unreadable data moved to {}", backup.display()),
                        Err(e) => log::warn!("Could not back up {}: {e}", path.display()),
                    }
                    DataRecord::default()
                }
            }
        };

        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceStore for JsonDataStore {
    fn data(&self) -> &DataRecord {
        &self.data
    }

    fn data_mut(&mut self) -> &mut DataRecord {
        &mut self.data
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        write_record(&self.path, &self.data)
    }
}

/// `game_data.json` -> `game_data.json.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

fn read_record(path: &Path) -> Result<DataRecord, StoreError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn write_record(path: &Path, data: &DataRecord) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Store that never touches the disk
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: DataRecord,
    /// Number of flushes, for tests
    pub flushes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: DataRecord) -> Self {
        Self { data, flushes: 0 }
    }
}

impl PersistenceStore for MemoryStore {
    fn data(&self) -> &DataRecord {
        &self.data
    }

    fn data_mut(&mut self) -> &mut DataRecord {
        &mut self.data
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SessionSummary;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("alien_invasion_data_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir.join(DATA_FILE)
    }

    fn summary(score: u64) -> SessionSummary {
        SessionSummary {
            score,
            level: 2,
            aliens_killed: 12,
            bullets_fired: 30,
            ships_left: 0,
            new_high_score: false,
        }
    }

    #[test]
    fn test_missing_file_created_with_defaults() {
        let path = temp_path("missing");
        let store = JsonDataStore::open(&path);
        assert!(path.exists());
        assert_eq!(store.data(), &DataRecord::default());
    }

    #[test]
    fn test_corrupt_file_uses_defaults() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[1, 2").unwrap();
        let mut store = JsonDataStore::open(&path);
        assert_eq!(store.data(), &DataRecord::default());

        // The unreadable file is set aside, not overwritten by the next flush
        store.add_game_session(&summary(10)).unwrap();
        let backup = backup_path(&path);
        assert_eq!(fs::read_to_string(&backup).unwrap(), "[1, 2");
        assert_eq!(JsonDataStore::open(&path).data().games_played, 1);
    }

    #[test]
    fn test_older_data_file_keeps_its_records() {
        let path = temp_path("older");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let json = r#"{
            "high_score": 4200,
            "games_played": 7,
            "total_score": 12000,
            "total_aliens_killed": 200,
            "total_bullets_fired": 400,
            "best_level": 5,
            "game_history": [
                {
                    "date": "2024-05-01 20:15:00",
                    "score": 4200,
                    "level": 5,
                    "aliens_killed": 80,
                    "bullets_fired": 150,
                    "ships_left": 0
                }
            ],
            "settings": { "sound_enabled": false }
        }"#;
        fs::write(&path, json).unwrap();

        let mut store = JsonDataStore::open(&path);
        assert_eq!(store.data().high_score, 4200);
        assert_eq!(store.data().games_played, 7);
        assert!(!store.load_settings().sound_enabled);

        store.add_game_session(&summary(300)).unwrap();
        let reopened = JsonDataStore::open(&path);
        assert_eq!(reopened.data().high_score, 4200);
        assert_eq!(reopened.data().games_played, 8);
        assert_eq!(reopened.data().total_score, 12300);
        assert_eq!(reopened.data().game_history.len(), 2);
        assert_eq!(
            reopened.data().game_history[1].date.as_deref(),
            Some("2024-05-01 20:15:00")
        );
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_sessions_survive_reopen() {
        let path = temp_path("reopen");
        {
            let mut store = JsonDataStore::open(&path);
            store.add_game_session(&summary(300)).unwrap();
            assert!(store.update_high_score(300).unwrap());
            store.save_settings(false).unwrap();
        }

        let store = JsonDataStore::open(&path);
        assert_eq!(store.data().high_score, 300);
        assert_eq!(store.data().games_played, 1);
        assert_eq!(store.data().game_history[0].aliens_killed, 12);
        assert!(store.data().game_history[0].timestamp > 0);
        assert!(!store.load_settings().sound_enabled);
    }

    #[test]
    fn test_reset_data_persists() {
        let path = temp_path("reset");
        let mut store = JsonDataStore::open(&path);
        store.add_game_session(&summary(300)).unwrap();
        store.save_settings(false).unwrap();
        store.reset_data().unwrap();

        let reopened = JsonDataStore::open(&path);
        assert_eq!(reopened.data().games_played, 0);
        assert!(!reopened.load_settings().sound_enabled);
    }

    #[test]
    fn test_memory_store_flushes_only_on_change() {
        let mut store = MemoryStore::new();
        assert!(store.update_high_score(10).unwrap());
        assert!(!store.update_high_score(5).unwrap());
        assert_eq!(store.flushes, 1);
        store.add_game_session(&summary(10)).unwrap();
        assert_eq!(store.flushes, 2);
        assert_eq!(store.get_statistics().games_played, 1);
    }
}
