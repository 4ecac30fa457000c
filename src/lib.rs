//! devcard-arena - Battle simulation for developer-profile fighter cards
//!
//! Two fighters, each derived from a developer profile, fight a turn-based
//! battle under a data-driven ruleset. The engine is deterministic given its
//! random source and produces an ordered battle log that the replay client
//! plays back and the result store aggregates into a leaderboard.
//!
//! This library exposes the core modules for testing and reuse.

pub mod battle;
pub mod cli;
pub mod data;
pub mod replay;
pub mod repository;
pub mod settings;
pub mod store;

// Re-export commonly used types
pub use battle::{
    simulate_battle, try_simulate_battle, BattleEvent, BattleEventType, BattleLog, BattleResult,
    GameRng,
};
pub use data::{Fighter, GameData};
pub use store::{Leaderboard, ResultStore, StoredBattleResult};
