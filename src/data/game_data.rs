//! Ruleset ("game data") consumed by every battle
//!
//! Mirrors the JSON document served by the content API. Lookups that miss
//! (unknown spirit animal, archetype without a type-chart entry, archetype
//! without abilities) fall back to neutral values rather than failing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a ruleset
#[derive(Debug, Error)]
pub enum RulesetError {
    #[error("failed to read ruleset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON ruleset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse RON ruleset: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("invalid mechanics.{field}: {reason}")]
    InvalidMechanics { field: &'static str, reason: String },

    #[error("invalid modifiers for spirit animal '{name}': {reason}")]
    InvalidSpiritAnimal { name: String, reason: String },
}

/// Multiplicative stat modifiers granted by a spirit animal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiritAnimalModifiers {
    #[serde(default = "unit_modifier")]
    pub attack: f64,
    #[serde(default = "unit_modifier")]
    pub defense: f64,
    #[serde(default = "unit_modifier")]
    pub speed: f64,
}

fn unit_modifier() -> f64 {
    1.0
}

impl SpiritAnimalModifiers {
    pub const NEUTRAL: SpiritAnimalModifiers = SpiritAnimalModifiers {
        attack: 1.0,
        defense: 1.0,
        speed: 1.0,
    };
}

impl Default for SpiritAnimalModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialMove {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<bool>,
}

/// Abilities catalogue entry for one archetype
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeAbility {
    #[serde(default)]
    pub special_moves: Vec<SpecialMove>,
    #[serde(default)]
    pub passive: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub playstyle: String,
}

/// Type-chart row, read from the attacker's side only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeAdvantage {
    #[serde(default)]
    pub strong_against: Vec<String>,
    #[serde(default)]
    pub weak_against: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeMultipliers {
    pub strong: f64,
    pub weak: f64,
    pub neutral: f64,
}

/// Numeric battle rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleMechanics {
    pub max_hp: f64,
    pub max_turns: u32,
    pub base_damage_multiplier: f64,
    pub random_variance: VarianceRange,
    pub type_multipliers: TypeMultipliers,
    pub minimum_damage: f64,
}

impl BattleMechanics {
    /// Damage multiplier for a matchup
    pub fn type_multiplier(&self, matchup: Matchup) -> f64 {
        match matchup {
            Matchup::Strong => self.type_multipliers.strong,
            Matchup::Weak => self.type_multipliers.weak,
            Matchup::Neutral => self.type_multipliers.neutral,
        }
    }

    fn validate(&self) -> Result<(), RulesetError> {
        fn bad(field: &'static str, reason: String) -> RulesetError {
            RulesetError::InvalidMechanics { field, reason }
        }

        if !(self.max_hp.is_finite() && self.max_hp > 0.0) {
            return Err(bad("max_hp", format!("must be positive, got {}", self.max_hp)));
        }
        if self.max_turns == 0 {
            return Err(bad("max_turns", "must be at least 1".to_string()));
        }
        if !(self.base_damage_multiplier.is_finite() && self.base_damage_multiplier > 0.0) {
            return Err(bad(
                "base_damage_multiplier",
                format!("must be positive, got {}", self.base_damage_multiplier),
            ));
        }
        let variance = self.random_variance;
        if !(variance.min.is_finite() && variance.max.is_finite()) || variance.min > variance.max {
            return Err(bad(
                "random_variance",
                format!("min {} must not exceed max {}", variance.min, variance.max),
            ));
        }
        let multipliers = [
            ("type_multipliers.strong", self.type_multipliers.strong),
            ("type_multipliers.weak", self.type_multipliers.weak),
            ("type_multipliers.neutral", self.type_multipliers.neutral),
        ];
        for (field, value) in multipliers {
            if !(value.is_finite() && value >= 0.0) {
                return Err(bad(field, format!("must be non-negative, got {}", value)));
            }
        }
        if !(self.minimum_damage.is_finite() && self.minimum_damage >= 0.0) {
            return Err(bad(
                "minimum_damage",
                format!("must be non-negative, got {}", self.minimum_damage),
            ));
        }
        Ok(())
    }
}

/// Outcome of a type-chart lookup from the attacker's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matchup {
    Strong,
    Weak,
    Neutral,
}

/// The complete ruleset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    #[serde(default)]
    pub archetypes: Vec<String>,
    #[serde(default)]
    pub type_chart: BTreeMap<String, TypeAdvantage>,
    #[serde(default)]
    pub spirit_animals: BTreeMap<String, SpiritAnimalModifiers>,
    #[serde(default)]
    pub archetype_abilities: BTreeMap<String, ArchetypeAbility>,
    pub mechanics: BattleMechanics,
}

impl GameData {
    /// Load a ruleset from a `.json` or `.ron` file and validate it
    pub fn load(path: &Path) -> Result<Self, RulesetError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RulesetError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_ron = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ron"));
        if is_ron {
            Self::from_ron_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self, RulesetError> {
        let data: GameData = serde_json::from_str(contents)?;
        data.validate()?;
        Ok(data)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, RulesetError> {
        let data: GameData = ron::from_str(contents)?;
        data.validate()?;
        Ok(data)
    }

    /// Check the shape the engine relies on, before any battle starts
    pub fn validate(&self) -> Result<(), RulesetError> {
        self.mechanics.validate()?;

        for (name, modifiers) in &self.spirit_animals {
            let values = [modifiers.attack, modifiers.defense, modifiers.speed];
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(RulesetError::InvalidSpiritAnimal {
                    name: name.clone(),
                    reason: format!(
                        "modifiers must be non-negative, got {}/{}/{}",
                        modifiers.attack, modifiers.defense, modifiers.speed
                    ),
                });
            }
        }
        Ok(())
    }

    /// Spirit-animal modifiers, neutral when the animal is unknown
    pub fn spirit_modifiers(&self, spirit_animal: &str) -> SpiritAnimalModifiers {
        self.spirit_animals
            .get(spirit_animal)
            .copied()
            .unwrap_or(SpiritAnimalModifiers::NEUTRAL)
    }

    /// Look up the attacker's type-chart row against the defender.
    ///
    /// Only the attacker's row is consulted.
    pub fn matchup(&self, attacker_archetype: &str, defender_archetype: &str) -> Matchup {
        let Some(row) = self.type_chart.get(attacker_archetype) else {
            return Matchup::Neutral;
        };

        if row.strong_against.iter().any(|a| a == defender_archetype) {
            Matchup::Strong
        } else if row.weak_against.iter().any(|a| a == defender_archetype) {
            Matchup::Weak
        } else {
            Matchup::Neutral
        }
    }

    /// Damage multiplier for attacker vs defender
    pub fn type_multiplier(&self, attacker_archetype: &str, defender_archetype: &str) -> f64 {
        self.mechanics
            .type_multiplier(self.matchup(attacker_archetype, defender_archetype))
    }

    /// Damage bonus of the archetype's first special move.
    ///
    /// Missing abilities, an empty move list, or a zero bonus all yield 1.0.
    pub fn special_move_bonus(&self, archetype: &str) -> f64 {
        self.first_special_move(archetype)
            .and_then(|m| m.damage_bonus)
            .filter(|bonus| *bonus != 0.0)
            .unwrap_or(1.0)
    }

    pub fn first_special_move(&self, archetype: &str) -> Option<&SpecialMove> {
        self.archetype_abilities
            .get(archetype)
            .and_then(|abilities| abilities.special_moves.first())
    }
}
