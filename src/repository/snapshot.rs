//! On-disk roster snapshot.
//!
//! A single JSON document holding the mirrored fighters, the ruleset and the
//! time of the last sync:
//!
//! ```json
//! {
//!   "last_synced": 1760000000,
//!   "game_data": { "mechanics": { ... }, ... },
//!   "fighters": [ { "profile": { ... }, "card": { ... } } ]
//! }
//! ```

use std::fs;
use std::path::Path;

use bevy::log::info;
use serde::{Deserialize, Serialize};

use crate::data::{Fighter, GameData};

use super::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterSnapshot {
    #[serde(default)]
    pub fighters: Vec<Fighter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_data: Option<GameData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced: Option<u64>,
}

impl RosterSnapshot {
    /// Load a snapshot, validating the ruleset if present.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&contents)?;
        info!(
            "Loaded {} fighters from {}",
            snapshot.fighters.len(),
            path.display()
        );
        Ok(snapshot)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let snapshot: RosterSnapshot = serde_json::from_str(contents)?;
        if let Some(game_data) = &snapshot.game_data {
            game_data.validate()?;
        }
        Ok(snapshot)
    }

    /// Write the snapshot as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
