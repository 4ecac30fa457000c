//! Repository contract for reading fighters and the ruleset.

use std::time::Duration;

use crate::data::{Fighter, GameData};

use super::Result;

/// Source of fighter records and the active ruleset
///
/// Implementations mirror whatever the content API last returned; the
/// engine only ever reads from them.
pub trait FighterRepository: Send + Sync {
    /// All battle-ready fighters
    fn fighters(&self) -> Result<Vec<Fighter>>;

    /// Look up a fighter by login (case-insensitive)
    fn fighter(&self, login: &str) -> Result<Fighter>;

    /// The ruleset every battle runs under
    fn game_data(&self) -> Result<GameData>;

    /// Unix timestamp (seconds) of the last successful sync, if any
    fn last_synced(&self) -> Option<u64>;

    /// Whether the mirrored data should be refreshed.
    ///
    /// An empty roster, a missing sync stamp, or a sync older than `max_age`
    /// all count as stale.
    fn is_stale(&self, max_age: Duration, now: u64) -> bool {
        let empty = self.fighters().map(|f| f.is_empty()).unwrap_or(true);
        if empty {
            return true;
        }
        match self.last_synced() {
            Some(synced) => now.saturating_sub(synced) > max_age.as_secs(),
            None => true,
        }
    }
}

pub(crate) fn find_by_login<'a>(fighters: &'a [Fighter], login: &str) -> Option<&'a Fighter> {
    fighters
        .iter()
        .find(|f| f.profile.login.eq_ignore_ascii_case(login))
}
