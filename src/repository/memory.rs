//! In-memory FighterRepository implementation for tests and local runs.

use std::sync::RwLock;

use crate::data::{Fighter, GameData};

use super::snapshot::RosterSnapshot;
use super::traits::find_by_login;
use super::{FighterRepository, RepositoryError, Result};

#[derive(Default)]
struct Roster {
    fighters: Vec<Fighter>,
    game_data: Option<GameData>,
    last_synced: Option<u64>,
}

/// In-memory implementation of FighterRepository.
///
/// Fighters are keyed by login; writes replace the stored record.
pub struct InMemoryRepository {
    roster: RwLock<Roster>,
}

impl InMemoryRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            roster: RwLock::new(Roster::default()),
        }
    }

    /// Create from a loaded snapshot.
    pub fn from_snapshot(snapshot: RosterSnapshot) -> Self {
        Self {
            roster: RwLock::new(Roster {
                fighters: snapshot.fighters,
                game_data: snapshot.game_data,
                last_synced: snapshot.last_synced,
            }),
        }
    }

    /// Insert or update a fighter, matched by login.
    pub fn upsert_fighter(&self, fighter: Fighter) -> Result<()> {
        let mut roster = self
            .roster
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let position = roster
            .fighters
            .iter()
            .position(|f| f.profile.login.eq_ignore_ascii_case(&fighter.profile.login));
        match position {
            Some(index) => roster.fighters[index] = fighter,
            None => roster.fighters.push(fighter),
        }
        Ok(())
    }

    /// Replace the ruleset after validating it.
    pub fn set_game_data(&self, game_data: GameData) -> Result<()> {
        game_data.validate()?;
        let mut roster = self
            .roster
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        roster.game_data = Some(game_data);
        Ok(())
    }

    /// Mirror a complete sync: upsert every fighter and stamp the sync time.
    pub fn apply_sync(&self, fighters: Vec<Fighter>, synced_at: u64) -> Result<usize> {
        let count = fighters.len();
        for fighter in fighters {
            self.upsert_fighter(fighter)?;
        }
        let mut roster = self
            .roster
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        roster.last_synced = Some(synced_at);
        Ok(count)
    }

    /// Drop all fighters and the sync stamp, forcing the next check to be stale.
    pub fn clear(&self) -> Result<()> {
        let mut roster = self
            .roster
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        roster.fighters.clear();
        roster.last_synced = None;
        Ok(())
    }

    /// Copy the current contents out as a snapshot.
    pub fn snapshot(&self) -> Result<RosterSnapshot> {
        let roster = self
            .roster
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(RosterSnapshot {
            fighters: roster.fighters.clone(),
            game_data: roster.game_data.clone(),
            last_synced: roster.last_synced,
        })
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl FighterRepository for InMemoryRepository {
    fn fighters(&self) -> Result<Vec<Fighter>> {
        let roster = self
            .roster
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(roster.fighters.clone())
    }

    fn fighter(&self, login: &str) -> Result<Fighter> {
        let roster = self
            .roster
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        find_by_login(&roster.fighters, login)
            .cloned()
            .ok_or_else(|| RepositoryError::FighterNotFound(login.to_string()))
    }

    fn game_data(&self) -> Result<GameData> {
        let roster = self
            .roster
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        roster.game_data.clone().ok_or(RepositoryError::NoGameData)
    }

    fn last_synced(&self) -> Option<u64> {
        self.roster
            .read()
            .map(|roster| roster.last_synced)
            .unwrap_or(None)
    }
}
