//! Card values.
//!
//! ## Key Types
//!
//! - `CardId`: Unique identity of one physical card in a session
//! - `Rank`: Integer value selecting the card's effect
//! - `Orientation`: Visibility to other seats (not ownership)
//! - `Card`: Identity, rank, display name, orientation

pub mod card;

pub use card::{Card, CardId, Orientation, Rank};
