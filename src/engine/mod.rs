//! The composition root: game state, snapshots, and the engine itself.
//!
//! ## Key Types
//!
//! - `GameEngine`: Owns the state and runs every operation
//! - `GameState`: Deck, seats, turn and round status
//! - `GameSnapshot`: Immutable view handed to the presentation layer
//! - `PendingPlay`: A selected card waiting for its parameters

pub mod game;
pub mod snapshot;
pub mod state;

pub use game::{CommandOutcome, GameEngine};
pub use snapshot::{GameSnapshot, PlayerView};
pub use state::{GameState, PendingPlay};
