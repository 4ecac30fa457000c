//! Arena settings
//!
//! Defaults for the command-line runner: where the roster snapshot and the
//! result store live, how fast battles play back, and when mirrored data
//! counts as stale. Stored as RON; every field may be omitted.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::replay::PlaybackSpeed;

pub const DEFAULT_SETTINGS_PATH: &str = "assets/config/arena.ron";

/// User-configurable arena settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Roster snapshot (fighters + ruleset) as JSON
    pub snapshot_path: PathBuf,
    /// Append-only battle history
    pub results_path: PathBuf,
    /// Events per second during replay, 0 plays the whole log at once
    pub playback_speed: f32,
    /// How old the last sync may be before the roster is reported stale
    pub stale_after_secs: u64,
    /// Fixed seed for every battle, for reproducible runs
    pub seed: Option<u64>,
    pub persist_results: bool,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("assets/data/snapshot.json"),
            results_path: PathBuf::from("battles.jsonl"),
            playback_speed: 1.0,
            stale_after_secs: 60 * 60,
            seed: None,
            persist_results: true,
        }
    }
}

impl ArenaSettings {
    /// Load settings from file, or return defaults if it is missing or unreadable
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str::<Self>(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings.with_checked_speed()
                }
                Err(e) => {
                    warn!("Failed to parse settings file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, contents)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Replace an unusable playback speed with the default one
    fn with_checked_speed(mut self) -> Self {
        match PlaybackSpeed::new(self.playback_speed) {
            Ok(speed) => self.playback_speed = speed.multiplier,
            Err(e) => {
                warn!("Ignoring settings playback speed: {}", e);
                self.playback_speed = PlaybackSpeed::default().multiplier;
            }
        }
        self
    }

    pub fn playback(&self) -> PlaybackSpeed {
        PlaybackSpeed::new(self.playback_speed).unwrap_or_default()
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}
