//! Ordered card containers owned by one seat.
//!
//! Every seat owns two hands: the holding hand (private, playable) and the
//! discard hand (face-up history of played cards). Order is insertion
//! order; the most recent discard is the top.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Rank};
use crate::core::PlayerId;
use crate::error::{EngineError, EngineResult};

/// The two roles a hand can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandRole {
    /// The seat's current, playable cards.
    Holding,
    /// The seat's played cards, face up.
    Discard,
}

/// An ordered card sequence belonging to one (seat, role) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hand {
    owner: PlayerId,
    role: HandRole,
    cards: Vector<Card>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new(owner: PlayerId, role: HandRole) -> Self {
        Self {
            owner,
            role,
            cards: Vector::new(),
        }
    }

    /// Seat owning this hand.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Role of this hand.
    #[must_use]
    pub fn role(&self) -> HandRole {
        self.role
    }

    /// Append a card.
    pub fn add(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove a card by id.
    ///
    /// `CardNotFound` here means the caller is working from a stale view
    /// of the table; the engine checks `contains` before calling this.
    pub fn remove(&mut self, card: CardId) -> EngineResult<Card> {
        let index = self
            .cards
            .iter()
            .position(|c| c.id == card)
            .ok_or(EngineError::CardNotFound {
                player: self.owner,
                card,
            })?;
        Ok(self.cards.remove(index))
    }

    /// Check if a card is in this hand.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.iter().any(|c| c.id == card)
    }

    /// Look up a card by id.
    #[must_use]
    pub fn get(&self, card: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card)
    }

    /// Iterate in hand order. Each call starts again from the first card.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// The most recently added card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if any card has this rank.
    #[must_use]
    pub fn has_rank(&self, rank: Rank) -> bool {
        self.cards.iter().any(|c| c.rank == rank)
    }

    /// Highest rank held, if any.
    #[must_use]
    pub fn highest_rank(&self) -> Option<Rank> {
        self.cards.iter().map(|c| c.rank).max()
    }

    /// Remove every card, in hand order.
    pub fn drain_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards).into_iter().collect()
    }

    /// Remove every card except those in `keep`, in hand order.
    pub fn drain_except(&mut self, keep: &[CardId]) -> Vec<Card> {
        let mut drained = Vec::new();
        let mut kept = Vector::new();
        for card in std::mem::take(&mut self.cards) {
            if keep.contains(&card.id) {
                kept.push_back(card);
            } else {
                drained.push(card);
            }
        }
        self.cards = kept;
        drained
    }

    /// Exchange contents with another hand. Owners and roles stay put.
    pub fn swap_cards(&mut self, other: &mut Hand) {
        std::mem::swap(&mut self.cards, &mut other.cards);
    }

    /// Share the backing sequence (for snapshots).
    #[must_use]
    pub fn cards(&self) -> Vector<Card> {
        self.cards.clone()
    }
}
