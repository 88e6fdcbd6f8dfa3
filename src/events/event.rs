//! Game event types.
//!
//! Events describe what a completed operation did, in the order it did
//! it. The engine appends them to its history and hands them to
//! subscribers; nothing in the engine reads them back.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Rank};
use crate::core::PlayerId;

/// Something that happened at the table.
///
/// ## Privacy
///
/// `Dealt` carries only the card id and `HandRevealed` names its viewer.
/// The presentation layer decides which seat may see which card faces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card was dealt face down into a holding hand.
    Dealt { to: PlayerId, card: CardId },

    /// A card moved from a holding hand to the discard pile, face up.
    Played {
        acting: PlayerId,
        card: CardId,
        rank: Rank,
        target: Option<PlayerId>,
        guess: Option<Rank>,
    },

    /// A seat was eliminated; its held cards are now face up.
    Eliminated { player: PlayerId, revealed: Vec<Card> },

    /// A seat became immune to targeting.
    SafetyGranted { player: PlayerId },

    /// A seat's safety ran out at the start of its turn.
    SafetyExpired { player: PlayerId },

    /// One seat was shown another seat's holding hand.
    HandRevealed {
        viewer: PlayerId,
        owner: PlayerId,
        cards: Vec<Card>,
    },

    /// Two seats compared their highest held ranks.
    HandsCompared {
        acting: PlayerId,
        target: PlayerId,
        acting_rank: Rank,
        target_rank: Rank,
    },

    /// Two seats swapped holding hands.
    HandsTraded { acting: PlayerId, target: PlayerId },

    /// A seat was forced to discard its hand.
    ForcedDiscard {
        player: PlayerId,
        discarded: Vec<Card>,
        replacement: Option<CardId>,
    },

    /// Discard piles were shuffled back into the empty deck.
    DeckRecycled { cards: usize },

    /// The turn passed to another seat.
    TurnAdvanced { to: PlayerId, turn: u32 },

    /// One active seat remains.
    RoundOver { winner: PlayerId },

    /// Every card went back into a fresh deck.
    RoundReset { round: u32 },
}

impl GameEvent {
    /// Short name for listings.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Dealt { .. } => "dealt",
            GameEvent::Played { .. } => "played",
            GameEvent::Eliminated { .. } => "eliminated",
            GameEvent::SafetyGranted { .. } => "safety_granted",
            GameEvent::SafetyExpired { .. } => "safety_expired",
            GameEvent::HandRevealed { .. } => "hand_revealed",
            GameEvent::HandsCompared { .. } => "hands_compared",
            GameEvent::HandsTraded { .. } => "hands_traded",
            GameEvent::ForcedDiscard { .. } => "forced_discard",
            GameEvent::DeckRecycled { .. } => "deck_recycled",
            GameEvent::TurnAdvanced { .. } => "turn_advanced",
            GameEvent::RoundOver { .. } => "round_over",
            GameEvent::RoundReset { .. } => "round_reset",
        }
    }

    /// The seat the event is mainly about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::Dealt { to, .. } | GameEvent::TurnAdvanced { to, .. } => Some(*to),
            GameEvent::Played { acting, .. }
            | GameEvent::HandsCompared { acting, .. }
            | GameEvent::HandsTraded { acting, .. } => Some(*acting),
            GameEvent::Eliminated { player, .. }
            | GameEvent::SafetyGranted { player }
            | GameEvent::SafetyExpired { player }
            | GameEvent::ForcedDiscard { player, .. } => Some(*player),
            GameEvent::HandRevealed { owner, .. } => Some(*owner),
            GameEvent::RoundOver { winner } => Some(*winner),
            GameEvent::DeckRecycled { .. } | GameEvent::RoundReset { .. } => None,
        }
    }
}
