//! In-memory ResultStore implementation for tests and local runs.

use std::sync::RwLock;

use super::{Result, ResultStore, StoreError, StoredBattleResult};

#[derive(Default)]
pub struct MemoryResultStore {
    records: RwLock<Vec<StoredBattleResult>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultStore for MemoryResultStore {
    fn save(&self, record: &StoredBattleResult) -> Result<String> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        records.push(record.clone());
        Ok(record.battle_id.clone())
    }

    fn all(&self) -> Result<Vec<StoredBattleResult>> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.clone())
    }
}
