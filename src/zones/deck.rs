//! The shared draw pile.
//!
//! Index 0 of the backing sequence is the bottom of the pile and the last
//! element is the top, so `draw` pops from the end. The pile is an
//! `im::Vector` so snapshots share structure with the live deck.

use im::Vector;

use crate::cards::{Card, CardId};
use crate::core::{DeckComposition, RandomSource};
use crate::effects::EffectTable;
use crate::error::{EngineError, EngineResult};

/// The undealt pile.
///
/// ## Usage
///
/// ```
/// use hidden_hand::core::GameRng;
/// use hidden_hand::effects::EffectTable;
/// use hidden_hand::zones::Deck;
///
/// let table = EffectTable::standard();
/// let mut deck = Deck::build(&table, &table.default_composition()).unwrap();
/// deck.shuffle(&mut GameRng::new(1));
///
/// let card = deck.draw().unwrap();
/// assert_eq!(deck.len(), 15);
/// deck.recycle([card]);
/// assert_eq!(deck.len(), 16);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create every card of a composition, ids starting at 1, unshuffled.
    ///
    /// Fails with `UnknownRank` if the composition names a rank the table
    /// does not define.
    pub fn build(table: &EffectTable, composition: &DeckComposition) -> EngineResult<Self> {
        let mut cards = Vector::new();
        let mut next_id = 1u32;

        for rank in composition.ranks() {
            let descriptor = table.descriptor(rank)?;
            cards.push_back(Card::new(CardId::new(next_id), rank, descriptor.name.clone()));
            next_id += 1;
        }

        Ok(Self { cards })
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> EngineResult<Card> {
        self.cards.pop_back().ok_or(EngineError::EmptyDeck)
    }

    /// Reorder the remaining cards.
    pub fn shuffle(&mut self, rng: &mut impl RandomSource) {
        let mut cards: Vec<Card> = self.cards.iter().cloned().collect();
        rng.shuffle_slice(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Put returned cards under the pile, face down.
    ///
    /// Does not shuffle; the caller decides when to.
    pub fn recycle(&mut self, cards: impl IntoIterator<Item = Card>) {
        for mut card in cards {
            card.flip_down();
            self.cards.push_front(card);
        }
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if no cards remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The next card `draw` would return.
    #[must_use]
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Iterate from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Share the backing sequence (for snapshots).
    #[must_use]
    pub fn cards(&self) -> Vector<Card> {
        self.cards.clone()
    }
}
