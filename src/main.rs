//! Alien Invasion - headless runner
//!
//! Loads the config and data files, plays games with the demo autopilot at
//! the fixed simulation rate, feeds every event to the sound manager and the
//! session recorder, and prints the aggregated statistics at the end.
//!
//! The settings panel is driven by flags (`--ship-speed`, `--music-volume`,
//! `--reset-settings` and friends): the values are applied to the game and
//! saved to the config file before the first game starts.

use std::path::PathBuf;
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use alien_invasion::audio::{LogBackend, SOUNDS_DIR, SoundManager};
use alien_invasion::config::CONFIG_FILE;
use alien_invasion::persistence::{
    DATA_FILE, JsonDataStore, PersistenceStore, SessionRecorder, Statistics,
};
use alien_invasion::platform::frame::format_score;
use alien_invasion::platform::{FixedClock, HudLogger, Renderer};
use alien_invasion::sim::{Autopilot, GameEvent, GameState, tick};
use alien_invasion::panel::{
    ALIEN_SPEED_RANGE, BULLET_SPEED_RANGE, SHIP_SPEED_RANGE, VOLUME_RANGE, clamp_to,
};
use alien_invasion::{ConfigStore, PanelSettings, apply_settings, reset_to_default};
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "alien-invasion")]
#[command(about = "Fixed-tick Alien Invasion simulation with a demo autopilot")]
struct Cli {
    /// Config file (created with defaults if missing)
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Persistent game data file
    #[arg(long, default_value = DATA_FILE)]
    data: PathBuf,
    /// Directory holding the sound assets
    #[arg(long, default_value = SOUNDS_DIR)]
    sounds: PathBuf,
    /// Games for the autopilot to play (0 only prints statistics)
    #[arg(long, default_value_t = 1)]
    games: u32,
    /// Autopilot seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Run ticks back to back instead of at 60 Hz
    #[arg(long, default_value_t = false)]
    fast: bool,
    /// Abandon a game after this many active ticks (30 min at 60 Hz)
    #[arg(long, default_value_t = 108_000)]
    max_ticks: u64,
    /// Clear scores and history (saved preferences are kept) before running
    #[arg(long, default_value_t = false)]
    reset_data: bool,
    /// Silence this run without changing the saved sound preference
    #[arg(long, default_value_t = false)]
    mute: bool,
    /// Flip the saved sound preference, like the in-game mute key
    #[arg(long, default_value_t = false)]
    toggle_sound: bool,
    /// Re-read the config file before each new game
    #[arg(long, default_value_t = false)]
    reload_config: bool,

    /// Settings panel: ship speed (0.5 - 3.0)
    #[arg(long)]
    ship_speed: Option<f32>,
    /// Settings panel: bullet speed (1.0 - 10.0)
    #[arg(long)]
    bullet_speed: Option<f32>,
    /// Settings panel: alien speed (0.5 - 3.0)
    #[arg(long)]
    alien_speed: Option<f32>,
    /// Settings panel: music volume (0.0 - 1.0)
    #[arg(long)]
    music_volume: Option<f32>,
    /// Settings panel: effects volume (0.0 - 1.0)
    #[arg(long)]
    effects_volume: Option<f32>,
    /// Settings panel: restore the default values before applying
    #[arg(long, default_value_t = false)]
    reset_settings: bool,
}

impl Cli {
    fn panel_requested(&self) -> bool {
        self.reset_settings
            || self.ship_speed.is_some()
            || self.bullet_speed.is_some()
            || self.alien_speed.is_some()
            || self.music_volume.is_some()
            || self.effects_volume.is_some()
    }

    /// Move the sliders named by flags; the rest keep their values
    fn panel_values(&self, mut values: PanelSettings) -> PanelSettings {
        if let Some(v) = self.ship_speed {
            values.ship_speed = clamp_to(v, &SHIP_SPEED_RANGE);
        }
        if let Some(v) = self.bullet_speed {
            values.bullet_speed = clamp_to(v, &BULLET_SPEED_RANGE);
        }
        if let Some(v) = self.alien_speed {
            values.alien_speed = clamp_to(v, &ALIEN_SPEED_RANGE);
        }
        if let Some(v) = self.music_volume {
            values.music_volume = clamp_to(v, &VOLUME_RANGE);
        }
        if let Some(v) = self.effects_volume {
            values.effects_volume = clamp_to(v, &VOLUME_RANGE);
        }
        values
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config_store = ConfigStore::new(&cli.config);
    let config = config_store.load();

    let mut store = JsonDataStore::open(&cli.data);
    if cli.reset_data {
        store
            .reset_data()
            .with_context(|| format!("failed to reset {}", store.path().display()))?;
    }

    if cli.games == 0 && !cli.panel_requested() && !cli.toggle_sound {
        print_statistics(&store.get_statistics());
        return Ok(());
    }

    // The saved preference wins over the config default; --mute is applied
    // after the panel so it never reaches either file.
    let mut sound_config = config.sound.clone();
    sound_config.enabled = store.load_settings().sound_enabled;
    let mut sound = SoundManager::new(&cli.sounds, &sound_config, LogBackend);
    if cli.toggle_sound {
        sound.toggle();
    }
    let sound_enabled = sound.is_enabled();

    let mut state = GameState::new(config, store.data().high_score);
    if cli.panel_requested() {
        let base = if cli.reset_settings {
            reset_to_default(&mut state)
        } else {
            PanelSettings::from_config(&state.config)
        };
        let values = PanelSettings {
            sound_enabled,
            ..cli.panel_values(base)
        };
        apply_settings(&mut state, &mut sound, &config_store, &values)
            .with_context(|| format!("failed to save {}", config_store.path().display()))?;
    }
    store
        .save_settings(sound_enabled)
        .with_context(|| format!("failed to save {}", store.path().display()))?;
    if cli.mute {
        sound.set_enabled(false);
    }

    if cli.games == 0 {
        print_statistics(&store.get_statistics());
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Alien Invasion starting (seed {seed}, {} games)", cli.games);

    let mut recorder = SessionRecorder::new(store);
    let mut pilot = Autopilot::new(seed);
    let mut hud = HudLogger::new();
    let mut clock = if cli.fast {
        FixedClock::unthrottled()
    } else {
        FixedClock::new()
    };

    let mut games_finished = 0;
    let mut last = Instant::now();
    'run: while games_finished < cli.games {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        for _ in 0..clock.ticks_due(dt) {
            let input = pilot.next_input(&state);
            for event in tick(&mut state, &input) {
                sound.handle_event(&event);
                recorder.handle_event(&event);
                if let GameEvent::GameOver(summary) = event {
                    games_finished += 1;
                    log::info!(
                        "Game {games_finished}/{} over: {} points",
                        cli.games,
                        format_score(summary.score)
                    );
                    pilot.auto_start = games_finished < cli.games;
                    if cli.reload_config && pilot.auto_start {
                        state.config = config_store.reload(&state.config);
                    }
                }
            }

            if state.time_ticks >= cli.max_ticks {
                log::warn!(
                    "Game abandoned after {} ticks (not recorded)",
                    state.time_ticks
                );
                break 'run;
            }
            if games_finished >= cli.games {
                break;
            }
        }

        hud.render(&state);
        if !clock.is_unthrottled() {
            thread::sleep(clock.until_next_tick());
        }
    }

    let mut store = recorder.into_inner();
    // Saved on quit, like the in-game quit key
    store
        .save_settings(sound_enabled)
        .with_context(|| format!("failed to save {}", store.path().display()))?;
    print_statistics(&store.get_statistics());
    Ok(())
}

fn print_statistics(stats: &Statistics) {
    println!("=== Statistics ===");
    println!("High score:       {}", format_score(stats.high_score));
    println!("Games played:     {}", stats.games_played);
    println!("Average score:    {}", format_score(stats.average_score));
    println!("Aliens destroyed: {}", stats.total_aliens_killed);
    println!("Aliens per game:  {}", stats.average_aliens_per_game);
    println!("Accuracy:         {:.1}%", stats.accuracy);
    println!("Best level:       {}", stats.best_level);

    if !stats.recent_games.is_empty() {
        println!("--- Recent games ---");
        for game in &stats.recent_games {
            println!(
                "{:>10} pts  level {:>2}  {:>3} kills / {:>4} shots",
                format_score(game.score),
                game.level,
                game.aliens_killed,
                game.bullets_fired
            );
        }
    }
}
