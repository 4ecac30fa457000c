//! Battle history for a single fighter

use serde::Serialize;

use crate::battle::damage::round_tenth;

use super::StoredBattleResult;

/// Battles listed in a fighter's recent history
pub const RECENT_BATTLE_LIMIT: usize = 10;

/// One stored battle seen from one fighter's side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerBattle {
    pub battle_id: String,
    pub timestamp: u64,
    pub opponent: String,
    pub won: bool,
    pub final_hp: f64,
    pub opponent_final_hp: f64,
    pub turns: u32,
    /// Set only on wins taken with the type advantage. The stored record
    /// does not say who held it in a loss.
    pub had_type_advantage: bool,
}

impl PlayerBattle {
    /// `None` when `login` did not fight in the record
    fn from_record(record: &StoredBattleResult, login: &str) -> Option<Self> {
        let won = record.winner.login.eq_ignore_ascii_case(login);
        if !won && !record.loser.login.eq_ignore_ascii_case(login) {
            return None;
        }
        let (me, them) = if won {
            (&record.winner, &record.loser)
        } else {
            (&record.loser, &record.winner)
        };

        Some(Self {
            battle_id: record.battle_id.clone(),
            timestamp: record.timestamp,
            opponent: them.login.clone(),
            won,
            final_hp: me.final_hp,
            opponent_final_hp: them.final_hp,
            turns: record.stats.total_turns,
            had_type_advantage: won && record.stats.winner_had_type_advantage,
        })
    }
}

/// Win/loss record and latest battles of one fighter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerHistory {
    pub login: String,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub total_damage_dealt: f64,
    /// Mean battle length, rounded to whole turns
    pub average_turns: u32,
    /// Newest first, at most [`RECENT_BATTLE_LIMIT`]
    pub recent_battles: Vec<PlayerBattle>,
}

impl PlayerHistory {
    /// Collect every battle `login` fought in. Logins match regardless of case.
    pub fn from_records(records: &[StoredBattleResult], login: &str) -> Self {
        let mut wins = 0u32;
        let mut losses = 0u32;
        let mut damage = 0.0;
        let mut turns = 0u64;
        let mut battles = Vec::new();

        // Reverse first so equal timestamps keep the later save on top
        for record in records.iter().rev() {
            let Some(battle) = PlayerBattle::from_record(record, login) else {
                continue;
            };
            if battle.won {
                wins += 1;
                damage += record.stats.total_damage_dealt_by_winner;
            } else {
                losses += 1;
                damage += record.stats.total_damage_dealt_by_loser;
            }
            turns += u64::from(battle.turns);
            battles.push(battle);
        }

        let played = wins + losses;
        let average_turns = if played > 0 {
            (turns as f64 / f64::from(played)).round() as u32
        } else {
            0
        };

        battles.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        battles.truncate(RECENT_BATTLE_LIMIT);

        Self {
            login: login.to_string(),
            wins,
            losses,
            win_rate: if played > 0 {
                f64::from(wins) / f64::from(played)
            } else {
                0.0
            },
            total_damage_dealt: round_tenth(damage),
            average_turns,
            recent_battles: battles,
        }
    }

    pub fn battles_played(&self) -> u32 {
        self.wins + self.losses
    }
}
