//! Battle outcome

use serde::{Deserialize, Serialize};

use crate::data::Fighter;

use super::log::{BattleEventType, BattleLog};

/// HP left on each side when the battle ended, rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalHp {
    pub challenger: f64,
    pub opponent: f64,
}

impl FinalHp {
    /// Whether the challenger came out ahead; equal HP favours the opponent
    pub fn challenger_won(&self) -> bool {
        self.challenger > self.opponent
    }

    pub fn winner(&self) -> f64 {
        if self.challenger_won() {
            self.challenger
        } else {
            self.opponent
        }
    }

    pub fn loser(&self) -> f64 {
        if self.challenger_won() {
            self.opponent
        } else {
            self.challenger
        }
    }
}

/// The complete, immutable output of one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner: Fighter,
    pub loser: Fighter,
    pub battle_log: BattleLog,
    pub total_turns: u32,
    pub final_hp: FinalHp,
}

impl BattleResult {
    /// Whether the battle ended with a knockout rather than on the turn limit
    pub fn is_knockout(&self) -> bool {
        self.battle_log
            .iter()
            .any(|e| e.event_type == BattleEventType::Knockout)
    }

    /// Total damage dealt by the winner
    pub fn winner_damage(&self) -> f64 {
        self.battle_log.damage_dealt_by(&self.winner.profile.login)
    }

    /// Total damage dealt by the loser
    pub fn loser_damage(&self) -> f64 {
        self.battle_log.damage_dealt_by(&self.loser.profile.login)
    }
}
