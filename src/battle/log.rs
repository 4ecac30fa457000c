//! Battle logging
//!
//! Records every discrete happening of a battle, in order, for replay and
//! post-battle aggregation.

use serde::{Deserialize, Serialize};

/// Types of battle log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleEventType {
    BattleStart,
    TypeAdvantage,
    SpeedCheck,
    Attack,
    SpecialMove,
    PassiveTrigger,
    Knockout,
    BattleEnd,
}

impl BattleEventType {
    /// Whether this event deals damage
    pub fn is_hit(self) -> bool {
        matches!(self, BattleEventType::Attack | BattleEventType::SpecialMove)
    }
}

/// A single entry in the battle log.
///
/// Only the fields relevant to the event type are populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleEvent {
    #[serde(rename = "type")]
    pub event_type: BattleEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<u32>,
    /// Human-readable description of the event
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attacker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attacker_hp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defender_hp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_move: Option<String>,
}

impl BattleEvent {
    pub fn new(event_type: BattleEventType, message: impl Into<String>) -> Self {
        Self {
            event_type,
            turn: None,
            message: message.into(),
            attacker: None,
            defender: None,
            damage: None,
            attacker_hp: None,
            defender_hp: None,
            type_multiplier: None,
            special_move: None,
        }
    }

    pub fn at_turn(mut self, turn: u32) -> Self {
        self.turn = Some(turn);
        self
    }

    pub fn with_attacker(mut self, login: &str) -> Self {
        self.attacker = Some(login.to_string());
        self
    }

    pub fn with_defender(mut self, login: &str) -> Self {
        self.defender = Some(login.to_string());
        self
    }

    /// Attach the outcome of a hit
    pub fn with_hit(
        mut self,
        damage: f64,
        attacker_hp: f64,
        defender_hp: f64,
        type_multiplier: f64,
    ) -> Self {
        self.damage = Some(damage);
        self.attacker_hp = Some(attacker_hp);
        self.defender_hp = Some(defender_hp);
        self.type_multiplier = Some(type_multiplier);
        self
    }

    /// Resulting HP of the affected fighter, for events that are not hits
    pub fn with_defender_hp(mut self, hp: f64) -> Self {
        self.defender_hp = Some(hp);
        self
    }

    pub fn with_special_move(mut self, name: &str) -> Self {
        self.special_move = Some(name.to_string());
        self
    }
}

/// Ordered list of battle events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleLog {
    /// All log entries in chronological order
    pub entries: Vec<BattleEvent>,
}

impl BattleLog {
    pub fn push(&mut self, event: BattleEvent) {
        self.entries.push(event);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BattleEvent> {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&BattleEvent> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&BattleEvent> {
        self.entries.last()
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: BattleEventType) -> Vec<&BattleEvent> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get only damage-dealing events (attacks and special moves)
    pub fn hits(&self) -> Vec<&BattleEvent> {
        self.entries
            .iter()
            .filter(|e| e.event_type.is_hit())
            .collect()
    }

    /// Total damage dealt by a fighter across attacks and special moves
    pub fn damage_dealt_by(&self, login: &str) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.event_type.is_hit() && e.attacker.as_deref() == Some(login))
            .filter_map(|e| e.damage)
            .sum()
    }
}

impl<'a> IntoIterator for &'a BattleLog {
    type Item = &'a BattleEvent;
    type IntoIter = std::slice::Iter<'a, BattleEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
