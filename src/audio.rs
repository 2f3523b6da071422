//! Sound manager
//!
//! Maps game events to sound effects and background music. Asset files are
//! checked once at startup; missing ones are reported and silently skipped.
//! Actual playback goes through an [`AudioBackend`], so the game runs the
//! same with or without a sound device.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SoundConfig;
use crate::sim::GameEvent;

/// Default directory holding the sound assets
pub const SOUNDS_DIR: &str = "sounds";

/// Background music asset
pub const MUSIC_FILE: &str = "background_music.mp3";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Projectile fired
    Shoot,
    /// Enemy destroyed
    Explosion,
    /// Ship lost
    ShipHit,
    /// Last ship lost
    GameOver,
    /// Wave cleared, difficulty up
    LevelUp,
}

const EFFECT_COUNT: usize = 5;

impl SoundEffect {
    pub const ALL: [SoundEffect; EFFECT_COUNT] = [
        SoundEffect::Shoot,
        SoundEffect::Explosion,
        SoundEffect::ShipHit,
        SoundEffect::GameOver,
        SoundEffect::LevelUp,
    ];

    /// Asset file name inside the sounds directory
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot.wav",
            SoundEffect::Explosion => "explosion.wav",
            SoundEffect::ShipHit => "ship_hit.wav",
            SoundEffect::GameOver => "game_over.wav",
            SoundEffect::LevelUp => "level_up.wav",
        }
    }

    /// Share of the effects volume this sound plays at
    pub fn volume_factor(self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.5,
            SoundEffect::Explosion => 0.6,
            SoundEffect::ShipHit => 0.7,
            SoundEffect::GameOver => 0.8,
            SoundEffect::LevelUp => 0.6,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Background music state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Playback device
pub trait AudioBackend {
    fn play_effect(&mut self, effect: SoundEffect, path: &Path, volume: f32);
    /// Start looping music from the beginning
    fn play_music(&mut self, path: &Path, volume: f32);
    fn stop_music(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn set_music_volume(&mut self, _volume: f32) {}
}

/// Backend that only logs what would be played (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_effect(&mut self, effect: SoundEffect, _path: &Path, volume: f32) {
        log::trace!("sfx {:?} at {:.2}", effect, volume);
    }

    fn play_music(&mut self, path: &Path, volume: f32) {
        log::debug!("music start {} at {:.2}", path.display(), volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music stop");
    }

    fn pause_music(&mut self) {
        log::debug!("music pause");
    }

    fn resume_music(&mut self) {
        log::debug!("music resume");
    }
}

/// Sound manager for the game
pub struct SoundManager<B: AudioBackend> {
    backend: B,
    dir: PathBuf,
    available: [bool; EFFECT_COUNT],
    music_available: bool,
    enabled: bool,
    music_volume: f32,
    effects_volume: f32,
    music: MusicState,
}

impl<B: AudioBackend> SoundManager<B> {
    /// Scan `dir` for assets. A missing directory is created empty.
    pub fn new(dir: impl Into<PathBuf>, config: &SoundConfig, backend: B) -> Self {
        let dir = dir.into();
        if !dir.exists() {
            match fs::create_dir_all(&dir) {
                Ok(()) => log::warn!(
                    "Created {}; put the sound files there to enable audio",
                    dir.display()
                ),
                Err(e) => log::warn!("Could not create {}: {e}", dir.display()),
            }
        }

        let mut available = [false; EFFECT_COUNT];
        for effect in SoundEffect::ALL {
            available[effect.index()] = dir.join(effect.file_name()).is_file();
        }
        let music_available = dir.join(MUSIC_FILE).is_file();

        let manager = Self {
            backend,
            dir,
            available,
            music_available,
            enabled: config.enabled,
            music_volume: config.music_volume.clamp(0.0, 1.0),
            effects_volume: config.effects_volume.clamp(0.0, 1.0),
            music: MusicState::Stopped,
        };

        let missing = manager.missing_sounds();
        if !manager.any_effect_loaded() {
            log::warn!("No sound effects found, running silent");
        } else if !missing.is_empty() {
            log::warn!("Missing sound files: {}", missing.join(", "));
        } else {
            log::info!("Sound effects loaded");
        }
        manager
    }

    fn any_effect_loaded(&self) -> bool {
        self.available.iter().any(|&a| a)
    }

    /// Asset files that were not found at startup
    pub fn missing_sounds(&self) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = SoundEffect::ALL
            .iter()
            .filter(|e| !self.available[e.index()])
            .map(|e| e.file_name())
            .collect();
        if !self.music_available {
            missing.push(MUSIC_FILE);
        }
        missing
    }

    /// Any effect can actually be heard right now
    pub fn sounds_available(&self) -> bool {
        self.enabled && self.any_effect_loaded()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn music_state(&self) -> MusicState {
        self.music
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Effective volume for an effect
    pub fn effect_volume(&self, effect: SoundEffect) -> f32 {
        self.effects_volume * effect.volume_factor()
    }

    /// Set effects volume (0.0 - 1.0)
    pub fn set_effects_volume(&mut self, volume: f32) {
        self.effects_volume = volume.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
        self.backend.set_music_volume(self.music_volume);
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if !self.enabled || !self.available[effect.index()] {
            return;
        }
        let path = self.dir.join(effect.file_name());
        let volume = self.effect_volume(effect);
        self.backend.play_effect(effect, &path, volume);
    }

    pub fn play_music(&mut self) {
        if !self.enabled {
            return;
        }
        if !self.music_available {
            log::debug!("No background music at {}", self.dir.join(MUSIC_FILE).display());
            return;
        }
        let path = self.dir.join(MUSIC_FILE);
        self.backend.play_music(&path, self.music_volume);
        self.music = MusicState::Playing;
    }

    pub fn stop_music(&mut self) {
        if self.music != MusicState::Stopped {
            self.backend.stop_music();
            self.music = MusicState::Stopped;
        }
    }

    pub fn pause_music(&mut self) {
        if self.music == MusicState::Playing {
            self.backend.pause_music();
            self.music = MusicState::Paused;
        }
    }

    pub fn resume_music(&mut self) {
        if self.enabled && self.music == MusicState::Paused {
            self.backend.resume_music();
            self.music = MusicState::Playing;
        }
    }

    /// Mute/unmute. Music pauses while muted and picks up where it left off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            self.resume_music();
        } else {
            self.pause_music();
        }
        log::info!("Sound {}", if enabled { "on" } else { "off" });
    }

    /// Flip mute. Returns the new enabled state.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// React to one simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted => {
                self.stop_music();
                self.play_music();
            }
            GameEvent::ShotFired => self.play(SoundEffect::Shoot),
            GameEvent::EnemyDestroyed { .. } => self.play(SoundEffect::Explosion),
            GameEvent::LevelUp { .. } => self.play(SoundEffect::LevelUp),
            GameEvent::ShipHit { .. } => self.play(SoundEffect::ShipHit),
            GameEvent::GameOver(_) => {
                self.play(SoundEffect::GameOver);
                self.stop_music();
            }
            GameEvent::WaveCleared { .. } => {}
        }
    }
}
