//! Core types: seats, roster identity, RNG, configuration, commands.
//!
//! This module contains the building blocks every other module shares.
//! Sessions are configured via `GameConfig` rather than compiled-in data.

pub mod player;
pub mod rng;
pub mod config;
pub mod command;

pub use player::{PlayerId, PlayerMap, RosterId};
pub use rng::{GameRng, RandomSource};
pub use config::{DeckComposition, DeckEntry, GameConfig, GameConfigBuilder, RosterEntry, SafetyDuration};
pub use command::{Command, CommandRecord};
