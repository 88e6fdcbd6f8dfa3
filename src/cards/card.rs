//! Card values.
//!
//! A `Card` is created once per session and then only moves between the
//! deck and the hands. Its identity and rank never change; only its
//! orientation does.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The integer value of a card. Determines its effect.
///
/// Ranks start at 1; the effect table defines how many exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    /// Create a new rank.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Get the raw rank value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rank {}", self.0)
    }
}

/// Visibility of a card to the other seats.
///
/// Orientation says nothing about ownership: a face-down card in a holding
/// hand is still visible to its owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Hidden from the other seats.
    #[default]
    FaceDown,
    /// Visible to every seat.
    FaceUp,
}

/// A playing card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identity within the session.
    pub id: CardId,

    /// Rank (selects the effect).
    pub rank: Rank,

    /// Display name, taken from the effect table.
    pub name: String,

    /// Current orientation.
    pub orientation: Orientation,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, rank: Rank, name: impl Into<String>) -> Self {
        Self {
            id,
            rank,
            name: name.into(),
            orientation: Orientation::FaceDown,
        }
    }

    /// Turn the card face up.
    pub fn flip_up(&mut self) {
        self.orientation = Orientation::FaceUp;
    }

    /// Turn the card face down.
    pub fn flip_down(&mut self) {
        self.orientation = Orientation::FaceDown;
    }

    /// Check if the card is visible to every seat.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.orientation == Orientation::FaceUp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::new(1) < Rank::new(8));
        assert_eq!(Rank::new(3).value(), 3);
        assert_eq!(format!("{}", Rank::new(3)), "Rank 3");
    }

    #[test]
    fn test_new_card_is_face_down() {
        let card = Card::new(CardId::new(1), Rank::new(4), "Wishing Ring");
        assert!(!card.is_face_up());
        assert_eq!(card.orientation, Orientation::FaceDown);
    }

    #[test]
    fn test_flip() {
        let mut card = Card::new(CardId::new(1), Rank::new(4), "Wishing Ring");

        card.flip_up();
        assert!(card.is_face_up());

        card.flip_down();
        assert!(!card.is_face_up());
    }

    #[test]
    fn test_card_serialization() {
        let mut card = Card::new(CardId::new(9), Rank::new(2), "Maul Rat");
        card.flip_up();

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
