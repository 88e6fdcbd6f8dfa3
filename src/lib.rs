//! # hidden-hand
//!
//! A state engine for hidden-information elimination card games.
//!
//! Players hold cards drawn from a shared deck, play them to resolve
//! effects that target or interrogate other players, and drop out until a
//! single player remains.
//!
//! ## Design Principles
//!
//! 1. **Table-Driven Effects**: Each rank's parameters and behavior come
//!    from an `EffectTable` entry. The resolver never matches on rank numbers.
//!
//! 2. **Atomic Operations**: An operation either completes or fails with
//!    the state untouched. No card moves on a rejected play.
//!
//! 3. **Card Conservation**: Cards are created once per session and only
//!    move between the deck and the hands.
//!
//! 4. **Roster Agnostic**: Any roster of 2-255 seats. The local seat is
//!    just the one the caller names.
//!
//! ## Architecture
//!
//! - **Single Writer**: `GameEngine` owns the state; operations take
//!   `&mut self`, so they are serialized by construction.
//!
//! - **Persistent Data Structures**: Hands and the deck are `im::Vector`s,
//!   so a `GameSnapshot` is cheap to take and safe to hand out.
//!
//! - **Notifications**: Every completed operation is appended to the
//!   event history and published to subscribers.
//!
//! ## Modules
//!
//! - `core`: Seat ids, RNG, configuration, commands
//! - `cards`: Card values
//! - `zones`: Deck and hands
//! - `players`: Seat registry and the out/safe flags
//! - `turns`: Turn order
//! - `effects`: Effect table, targeting, resolution
//! - `events`: Game events and subscribers
//! - `engine`: Game state, snapshots, the engine

pub mod cards;
pub mod core;
pub mod effects;
pub mod engine;
pub mod error;
pub mod events;
pub mod players;
pub mod turns;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Command, CommandRecord, DeckComposition, GameConfig, GameRng, PlayerId, PlayerMap,
    RandomSource, RosterEntry, RosterId, SafetyDuration,
};

pub use crate::cards::{Card, CardId, Orientation, Rank};

pub use crate::zones::{Deck, Hand, HandRole};

pub use crate::players::{Player, PlayerRegistry};

pub use crate::turns::{TurnAdvance, TurnCoordinator};

pub use crate::effects::{
    EffectDescriptor, EffectKind, EffectResolver, EffectTable, ParamShape, PlayOutcome,
};

pub use crate::events::{EventBus, GameEvent, Notification, Subscriber};

pub use crate::engine::{CommandOutcome, GameEngine, GameSnapshot, GameState, PlayerView};

pub use crate::error::{EngineError, EngineResult};
