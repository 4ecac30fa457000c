//! Battle log playback state
//!
//! Steps through a finished battle one event at a time. Playback only reads
//! the event fields; it never re-derives game rules.

use bevy::prelude::*;

use crate::battle::{BattleEvent, BattleEventType, BattleResult};

/// Cursor over a finished battle's log
#[derive(Resource, Debug, Clone)]
pub struct BattleReplay {
    result: BattleResult,
    challenger_login: String,
    /// Number of events played so far
    cursor: usize,
    /// Displayed HP, updated only from event fields
    pub challenger_hp: f64,
    pub opponent_hp: f64,
    /// Turn of the last played event that carried one
    pub current_turn: u32,
}

impl BattleReplay {
    /// `challenger_login` tells the replay which HP bar an event updates
    pub fn new(result: BattleResult, challenger_login: impl Into<String>, max_hp: f64) -> Self {
        Self {
            result,
            challenger_login: challenger_login.into(),
            cursor: 0,
            challenger_hp: max_hp,
            opponent_hp: max_hp,
            current_turn: 0,
        }
    }

    pub fn result(&self) -> &BattleResult {
        &self.result
    }

    pub fn played(&self) -> usize {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.result.battle_log.len()
    }

    /// Fraction of events played, in `[0.0, 1.0]`
    pub fn progress(&self) -> f32 {
        let total = self.result.battle_log.len();
        if total == 0 {
            1.0
        } else {
            self.cursor as f32 / total as f32
        }
    }

    /// Play the next event, returning it
    pub fn advance(&mut self) -> Option<&BattleEvent> {
        let index = self.cursor;
        let event = self.result.battle_log.entries.get(index)?;
        self.cursor += 1;

        if let Some(turn) = event.turn {
            self.current_turn = turn;
        }

        let updates_hp = matches!(
            event.event_type,
            BattleEventType::Attack | BattleEventType::SpecialMove | BattleEventType::PassiveTrigger
        );
        if updates_hp {
            if let (Some(defender), Some(hp)) = (event.defender.as_deref(), event.defender_hp) {
                if defender == self.challenger_login {
                    self.challenger_hp = hp;
                } else {
                    self.opponent_hp = hp;
                }
            }
        }

        self.result.battle_log.entries.get(index)
    }
}

/// One display line for an event
pub fn describe(event: &BattleEvent) -> String {
    let prefix = match event.turn {
        Some(turn) => format!("[Turn {:>2}] ", turn),
        None => String::new(),
    };

    match event.event_type {
        BattleEventType::Attack | BattleEventType::SpecialMove => {
            let mut line = format!("{}{}", prefix, event.message);
            if let Some(damage) = event.damage {
                line.push_str(&format!(" for {} damage", damage));
            }
            match event.type_multiplier {
                Some(m) if m > 1.0 => line.push_str(" - SUPER EFFECTIVE!"),
                Some(m) if m < 1.0 => line.push_str(" - not very effective..."),
                _ => {}
            }
            if let (Some(defender), Some(hp)) = (&event.defender, event.defender_hp) {
                line.push_str(&format!(" ({} at {} HP)", defender, hp));
            }
            line
        }
        BattleEventType::Knockout => format!("{}*** {} ***", prefix, event.message),
        BattleEventType::BattleEnd => format!("=== {} ===", event.message),
        _ => format!("{}{}", prefix, event.message),
    }
}
