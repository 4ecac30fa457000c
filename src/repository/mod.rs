//! Fighter Repository
//!
//! Supplies fighter records and the ruleset to the battle engine. The
//! repository is a local mirror of the content API; how it gets refreshed is
//! outside this crate, but staleness is decided here.

mod error;
mod memory;
mod snapshot;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryRepository;
pub use snapshot::RosterSnapshot;
pub use traits::FighterRepository;

use std::path::Path;

/// Open a repository backed by a snapshot file.
pub fn open_snapshot(path: &Path) -> Result<InMemoryRepository> {
    RosterSnapshot::load(path).map(InMemoryRepository::from_snapshot)
}
