//! Card locations: the shared deck and each seat's hands.
//!
//! ## Key Types
//!
//! - `Deck`: The undealt pile; top is the next card dealt
//! - `Hand`: An ordered card sequence owned by one seat in one role
//! - `HandRole`: Holding (playable) or Discard (played, face up)
//!
//! Cards only ever move between these containers, so the multiset of card
//! ids across the deck and all hands is fixed for the session.

pub mod deck;
pub mod hand;

pub use deck::Deck;
pub use hand::{Hand, HandRole};
