//! Battle simulation
//!
//! Resolves a complete battle between two fighter cards under a ruleset:
//! - Spirit-animal stat modifiers and speed-based turn order
//! - Type-chart multipliers and randomized damage
//! - Archetype passives and every-third-turn special moves
//! - An ordered battle log for replay and aggregation

pub mod damage;
pub mod engine;
pub mod log;
pub mod passives;
pub mod result;
pub mod rng;
pub mod stats;

pub use engine::{is_special_turn, simulate_battle, try_simulate_battle, BattleEngine, BattleError};
pub use log::{BattleEvent, BattleEventType, BattleLog};
pub use passives::Passive;
pub use result::{BattleResult, FinalHp};
pub use rng::{FixedRolls, GameRng, RandomSource};
pub use stats::{FighterStats, Side};
