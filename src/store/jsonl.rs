//! Append-only JSON-lines result store.
//!
//! Each saved battle is one line of JSON:
//! ```text
//! {"battle_id":"...","timestamp":...,"winner":{...},...}
//! {"battle_id":"...","timestamp":...,"winner":{...},...}
//! ```

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{Result, ResultStore, StoreError, StoredBattleResult};

pub struct JsonLinesResultStore {
    path: PathBuf,
    /// Serializes appends from concurrent savers
    write_lock: Mutex<()>,
}

impl JsonLinesResultStore {
    /// Open a store at `path`, creating parent directories as needed.
    ///
    /// The file itself is created on first save.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultStore for JsonLinesResultStore {
    fn save(&self, record: &StoredBattleResult) -> Result<String> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        Ok(record.battle_id.clone())
    }

    fn all(&self) -> Result<Vec<StoredBattleResult>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(fs::File::open(&self.path)?);
        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|e| StoreError::CorruptedRecord {
                line: index + 1,
                reason: e.to_string(),
            })?;
            records.push(record);
        }
        Ok(records)
    }
}
