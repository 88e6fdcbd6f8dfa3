//! Whose turn it is.

pub mod coordinator;

pub use coordinator::{TurnAdvance, TurnCoordinator};
