//! Fighter records
//!
//! A fighter is a developer profile paired with its battle card. Fighters are
//! read-only inputs to a battle; per-battle state lives in
//! [`FighterStats`](crate::battle::FighterStats).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fighter card that cannot enter a battle
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CardError {
    #[error("{login} has invalid {field}: {value}")]
    InvalidStat {
        login: String,
        field: &'static str,
        value: f64,
    },

    #[error("{login} has no archetype")]
    MissingArchetype { login: String },
}

/// Public profile information attached to a fighter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// Battle card stats and flavour for a fighter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCard {
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub archetype: String,
    pub spirit_animal: String,
    /// Player-chosen special move name (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_move: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buff: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weakness: Option<String>,
}

/// A profile with its card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub profile: Profile,
    pub card: ProfileCard,
}

impl Fighter {
    pub fn login(&self) -> &str {
        &self.profile.login
    }

    pub fn archetype(&self) -> &str {
        &self.card.archetype
    }

    /// Check that the card stats are usable numbers.
    ///
    /// Reports the first bad stat.
    pub fn validate_card(&self) -> Result<(), CardError> {
        let stats = [
            ("attack", self.card.attack),
            ("defense", self.card.defense),
            ("speed", self.card.speed),
        ];
        for (field, value) in stats {
            if !value.is_finite() || value < 0.0 {
                return Err(CardError::InvalidStat {
                    login: self.profile.login.clone(),
                    field,
                    value,
                });
            }
        }
        if self.card.archetype.is_empty() {
            return Err(CardError::MissingArchetype {
                login: self.profile.login.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter(attack: f64) -> Fighter {
        Fighter {
            profile: Profile {
                id: 7,
                login: "octo".to_string(),
                name: "Octo Cat".to_string(),
                avatar_url: String::new(),
            },
            card: ProfileCard {
                attack,
                defense: 40.0,
                speed: 55.0,
                archetype: "The Sage".to_string(),
                spirit_animal: "Owl".to_string(),
                special_move: None,
                vibe: None,
                buff: None,
                weakness: None,
            },
        }
    }

    #[test]
    fn test_card_deserializes_with_missing_optional_fields() {
        let json = r#"{
            "profile": {"id": 1, "login": "ghost"},
            "card": {"attack": 70, "defense": 50, "speed": 65,
                     "archetype": "The Jester", "spirit_animal": "Fox"}
        }"#;
        let parsed: Fighter = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.login(), "ghost");
        assert_eq!(parsed.card.attack, 70.0);
        assert!(parsed.card.special_move.is_none());
        assert!(parsed.profile.name.is_empty());
    }

    #[test]
    fn test_validate_card_rejects_negative_and_nan() {
        assert!(fighter(60.0).validate_card().is_ok());
        assert!(matches!(
            fighter(-1.0).validate_card(),
            Err(CardError::InvalidStat { field: "attack", value, .. }) if value == -1.0
        ));
        assert_eq!(
            fighter(-1.0).validate_card().unwrap_err().to_string(),
            "octo has invalid attack: -1"
        );
        assert!(fighter(f64::NAN).validate_card().is_err());
    }

    #[test]
    fn test_validate_card_requires_archetype() {
        let mut nameless = fighter(60.0);
        nameless.card.archetype.clear();
        assert_eq!(
            nameless.validate_card(),
            Err(CardError::MissingArchetype {
                login: "octo".to_string()
            })
        );
    }
}
