//! Leaderboard aggregation over stored battles

use std::collections::HashMap;

use serde::Serialize;

use crate::battle::damage::round_tenth;

use super::StoredBattleResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub login: String,
    pub profile_id: u64,
    pub total_wins: u32,
    pub total_losses: u32,
    pub win_rate: f64,
    pub total_damage_dealt: f64,
    pub favorite_archetype: String,
    /// Unix timestamp of the most recent battle
    pub last_battle_timestamp: u64,
}

#[derive(Default)]
struct Tally {
    profile_id: u64,
    wins: u32,
    losses: u32,
    damage: f64,
    archetypes: HashMap<String, u32>,
    last_battle: u64,
}

impl Tally {
    fn record(&mut self, profile_id: u64, archetype: &str, damage: f64, timestamp: u64) {
        self.profile_id = profile_id;
        self.damage += damage;
        *self.archetypes.entry(archetype.to_string()).or_default() += 1;
        self.last_battle = self.last_battle.max(timestamp);
    }

    /// Most used archetype; ties go to the alphabetically first name
    fn favorite_archetype(&self) -> String {
        self.archetypes
            .iter()
            .max_by(|(a_name, a_count), (b_name, b_count)| {
                a_count.cmp(b_count).then_with(|| b_name.cmp(a_name))
            })
            .map(|(name, _)| name.clone())
            .unwrap_or_default()
    }
}

/// Ranked per-fighter win/loss table
#[derive(Debug, Clone, Default, Serialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Aggregate stored battles.
    ///
    /// Sorted by wins, then win rate (both descending), then login.
    pub fn from_records(records: &[StoredBattleResult]) -> Self {
        let mut tallies: HashMap<String, Tally> = HashMap::new();

        for record in records {
            let winner = tallies.entry(record.winner.login.clone()).or_default();
            winner.wins += 1;
            winner.record(
                record.winner.profile_id,
                &record.winner.archetype,
                record.stats.total_damage_dealt_by_winner,
                record.timestamp,
            );

            let loser = tallies.entry(record.loser.login.clone()).or_default();
            loser.losses += 1;
            loser.record(
                record.loser.profile_id,
                &record.loser.archetype,
                record.stats.total_damage_dealt_by_loser,
                record.timestamp,
            );
        }

        let mut entries: Vec<LeaderboardEntry> = tallies
            .into_iter()
            .map(|(login, tally)| {
                let played = tally.wins + tally.losses;
                LeaderboardEntry {
                    favorite_archetype: tally.favorite_archetype(),
                    login,
                    profile_id: tally.profile_id,
                    total_wins: tally.wins,
                    total_losses: tally.losses,
                    win_rate: if played > 0 {
                        f64::from(tally.wins) / f64::from(played)
                    } else {
                        0.0
                    },
                    total_damage_dealt: round_tenth(tally.damage),
                    last_battle_timestamp: tally.last_battle,
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.total_wins
                .cmp(&a.total_wins)
                .then_with(|| b.win_rate.total_cmp(&a.win_rate))
                .then_with(|| a.login.cmp(&b.login))
        });

        Self { entries }
    }

    pub fn top(&self, limit: usize) -> &[LeaderboardEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn entry(&self, login: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.login == login)
    }
}
