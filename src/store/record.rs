//! Stored battle outcome
//!
//! The flattened document written for every finished battle. Aggregate
//! figures are derived from the battle log, never recomputed from the rules.

use serde::{Deserialize, Serialize};

use crate::battle::damage::round_tenth;
use crate::battle::{BattleEventType, BattleResult};
use crate::data::Fighter;

/// Version tag written with every record
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One side of a stored battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterSummary {
    pub login: String,
    pub profile_id: u64,
    pub archetype: String,
    pub spirit_animal: String,
    pub final_hp: f64,
}

impl FighterSummary {
    fn new(fighter: &Fighter, final_hp: f64) -> Self {
        Self {
            login: fighter.profile.login.clone(),
            profile_id: fighter.profile.id,
            archetype: fighter.card.archetype.clone(),
            spirit_animal: fighter.card.spirit_animal.clone(),
            final_hp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleStats {
    pub total_turns: u32,
    pub total_damage_dealt_by_winner: f64,
    pub total_damage_dealt_by_loser: f64,
    pub winner_had_type_advantage: bool,
    /// Approximated as one second per turn
    pub battle_duration_seconds: u32,
}

/// A finished battle as persisted by a [`ResultStore`](super::ResultStore)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBattleResult {
    pub battle_id: String,
    /// Unix timestamp in seconds
    pub timestamp: u64,
    pub winner: FighterSummary,
    pub loser: FighterSummary,
    pub stats: BattleStats,
    pub version: String,
}

impl StoredBattleResult {
    /// Derive the stored document from a battle result
    pub fn from_result(result: &BattleResult, battle_id: String, timestamp: u64) -> Self {
        // The advantage event names both archetypes, so any advantage event
        // mentioning the winner's archetype counts.
        let winner_archetype = &result.winner.card.archetype;
        let winner_had_type_advantage = result.battle_log.iter().any(|e| {
            e.event_type == BattleEventType::TypeAdvantage
                && e.message.contains(winner_archetype.as_str())
        });

        Self {
            battle_id,
            timestamp,
            winner: FighterSummary::new(&result.winner, result.final_hp.winner()),
            loser: FighterSummary::new(&result.loser, result.final_hp.loser()),
            stats: BattleStats {
                total_turns: result.total_turns,
                total_damage_dealt_by_winner: round_tenth(result.winner_damage()),
                total_damage_dealt_by_loser: round_tenth(result.loser_damage()),
                winner_had_type_advantage,
                battle_duration_seconds: result.total_turns,
            },
            version: ENGINE_VERSION.to_string(),
        }
    }
}
