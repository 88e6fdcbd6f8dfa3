//! The rank -> effect table.
//!
//! `EffectTable` stores one descriptor per rank, ranks numbered 1..=N with
//! no gaps. It provides lookup by `Rank`, the guessable-rank list, and the
//! default deck composition.

use serde::{Deserialize, Serialize};

use super::descriptor::{EffectDescriptor, EffectKind};
use crate::cards::Rank;
use crate::core::DeckComposition;
use crate::error::{EngineError, EngineResult};

/// Table of effect descriptors indexed by rank.
///
/// ## Example
///
/// ```
/// use hidden_hand::cards::Rank;
/// use hidden_hand::effects::{EffectKind, EffectTable};
///
/// let table = EffectTable::standard();
/// assert_eq!(table.len(), 8);
/// assert_eq!(table.get(Rank::new(4)).unwrap().kind, EffectKind::GrantSafety);
/// assert!(table.get(Rank::new(9)).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTable {
    entries: Vec<EffectDescriptor>,
}

impl EffectTable {
    /// Build a table from descriptors in any order.
    ///
    /// Fails if the table is empty, its ranks are not exactly 1..=N, or an
    /// entry's shape differs from the one its kind resolves with.
    pub fn new(mut entries: Vec<EffectDescriptor>) -> EngineResult<Self> {
        if entries.is_empty() {
            return Err(EngineError::InvalidEffectTable("no ranks defined"));
        }
        if entries.len() > u8::MAX as usize {
            return Err(EngineError::InvalidEffectTable("too many ranks"));
        }

        entries.sort_by_key(|d| d.rank);
        for (i, entry) in entries.iter().enumerate() {
            if entry.rank.value() as usize != i + 1 {
                return Err(EngineError::InvalidEffectTable("ranks must be 1..=N without gaps"));
            }
            if entry.shape != entry.kind.shape() {
                return Err(EngineError::InvalidEffectTable("shape does not match effect kind"));
            }
        }

        Ok(Self { entries })
    }

    /// The eight-rank table used by the standard deck.
    #[must_use]
    pub fn standard() -> Self {
        let entries = vec![
            EffectDescriptor::new(Rank::new(1), "Munchkin", EffectKind::GuessAndEliminate)
                .with_copies(5)
                .with_description("Name a rank other than 1. If the target holds it, they are out.")
                .not_guessable(),
            EffectDescriptor::new(Rank::new(2), "Maul Rat", EffectKind::PeekAtHand)
                .with_copies(2)
                .with_description("Look at another player's hand."),
            EffectDescriptor::new(Rank::new(3), "Duck of Doom", EffectKind::CompareHands)
                .with_copies(2)
                .with_description("Compare hands with another player. The lower rank is out."),
            EffectDescriptor::new(Rank::new(4), "Wishing Ring", EffectKind::GrantSafety)
                .with_copies(2)
                .with_description("You cannot be targeted for the rest of the round."),
            EffectDescriptor::new(Rank::new(5), "Net Troll", EffectKind::ForceDiscard)
                .with_copies(2)
                .with_description("Choose any player, yourself included. They discard and draw.")
                .targets_self(),
            EffectDescriptor::new(Rank::new(6), "Dread Gazebo", EffectKind::TradeHands)
                .with_description("Trade hands with another player."),
            EffectDescriptor::new(Rank::new(7), "Turbonium Dragon", EffectKind::NoEffect)
                .with_description("Must be played if you also hold rank 5 or 6.")
                .forced_by([Rank::new(5), Rank::new(6)]),
            EffectDescriptor::new(Rank::new(8), "Loot", EffectKind::EliminateOnDiscard)
                .with_description("If you discard this card, you are out."),
        ];

        Self { entries }
    }

    /// Get the descriptor for a rank.
    #[must_use]
    pub fn get(&self, rank: Rank) -> Option<&EffectDescriptor> {
        let index = (rank.value() as usize).checked_sub(1)?;
        self.entries.get(index)
    }

    /// Get the descriptor for a rank, failing with `UnknownRank`.
    pub fn descriptor(&self, rank: Rank) -> EngineResult<&EffectDescriptor> {
        self.get(rank).ok_or(EngineError::UnknownRank(rank))
    }

    /// Number of ranks (N).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over descriptors in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectDescriptor> {
        self.entries.iter()
    }

    /// Ranks a guessing effect may name, in rank order.
    #[must_use]
    pub fn guessable_ranks(&self) -> Vec<Rank> {
        self.entries
            .iter()
            .filter(|d| d.guessable)
            .map(|d| d.rank)
            .collect()
    }

    /// Whether playing or discarding this rank eliminates the holder.
    #[must_use]
    pub fn eliminates_on_discard(&self, rank: Rank) -> bool {
        self.get(rank)
            .is_some_and(|d| d.kind == EffectKind::EliminateOnDiscard)
    }

    /// Deck composition taken from each descriptor's `copies`.
    #[must_use]
    pub fn default_composition(&self) -> DeckComposition {
        DeckComposition::new(self.entries.iter().map(|d| (d.rank, d.copies)))
    }
}

impl Default for EffectTable {
    fn default() -> Self {
        Self::standard()
    }
}
