//! Result Store
//!
//! Persists finished battles and aggregates them into a leaderboard and
//! per-fighter histories.
//! Saving is best-effort: a failed write is logged and never interrupts
//! battle playback.

mod error;
mod history;
mod jsonl;
mod leaderboard;
mod memory;
mod record;

pub use error::{Result, StoreError};
pub use history::{PlayerBattle, PlayerHistory, RECENT_BATTLE_LIMIT};
pub use jsonl::JsonLinesResultStore;
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use memory::MemoryResultStore;
pub use record::{BattleStats, FighterSummary, StoredBattleResult, ENGINE_VERSION};

use std::time::{SystemTime, UNIX_EPOCH};

use bevy::log::{info, warn};

use crate::battle::BattleResult;

/// Persistence backend for finished battles
pub trait ResultStore: Send + Sync {
    /// Persist a record, returning its battle id
    fn save(&self, record: &StoredBattleResult) -> Result<String>;

    /// Every stored record, oldest first
    fn all(&self) -> Result<Vec<StoredBattleResult>>;

    fn leaderboard(&self) -> Result<Leaderboard> {
        Ok(Leaderboard::from_records(&self.all()?))
    }

    fn history(&self, login: &str) -> Result<PlayerHistory> {
        Ok(PlayerHistory::from_records(&self.all()?, login))
    }
}

/// Current Unix time in seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn new_battle_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Derive and save a record for a finished battle.
///
/// Returns the battle id, or `None` if the store rejected the write.
pub fn record_battle(store: &dyn ResultStore, result: &BattleResult) -> Option<String> {
    let record = StoredBattleResult::from_result(result, new_battle_id(), unix_now());
    match store.save(&record) {
        Ok(id) => {
            info!(
                "Saved battle {}: {} beat {}",
                id, record.winner.login, record.loser.login
            );
            Some(id)
        }
        Err(e) => {
            warn!("Failed to save battle result: {}", e);
            None
        }
    }
}
