//! Fighter and ruleset data model
//!
//! Everything here is immutable input to the battle engine, shaped like the
//! documents served by the content API.

pub mod fighter;
pub mod game_data;

pub use fighter::{CardError, Fighter, Profile, ProfileCard};
pub use game_data::{
    ArchetypeAbility, BattleMechanics, GameData, Matchup, RulesetError, SpecialMove,
    SpiritAnimalModifiers, TypeAdvantage, TypeMultipliers, VarianceRange,
};
