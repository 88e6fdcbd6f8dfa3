//! Immutable views of the game for the presentation layer.
//!
//! Hands are shared `im::Vector`s, so taking a snapshot copies no cards.
//! A snapshot holds every seat's cards; `visible_holding` is the accessor
//! that respects hidden information.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::state::PendingPlay;
use crate::cards::Card;
use crate::core::{PlayerId, RosterId};

/// One seat as of the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub seat: PlayerId,
    pub roster_id: RosterId,
    pub name: String,
    pub is_out: bool,
    pub is_safe: bool,
    /// Held cards. Use `GameSnapshot::visible_holding` for display.
    pub holding: Vector<Card>,
    /// Discard pile, oldest first, all face up.
    pub discard: Vector<Card>,
}

/// The whole table at one point in time.
///
/// ## Example
///
/// ```
/// use hidden_hand::core::{GameConfig, PlayerId, RosterEntry, RosterId};
/// use hidden_hand::engine::GameEngine;
///
/// let config = GameConfig::builder()
///     .seat(RosterEntry::new(RosterId::new(1), "Ben"))
///     .seat(RosterEntry::new(RosterId::new(2), "Josh"))
///     .build();
/// let mut engine = GameEngine::new(config).unwrap();
/// engine.deal_all().unwrap();
///
/// let snapshot = engine.snapshot();
/// let me = snapshot.local_player;
/// assert!(snapshot.visible_holding(me, me).is_some());
/// assert!(snapshot.visible_holding(me, PlayerId::new(1)).is_none());
/// assert_eq!(snapshot.holding_size(PlayerId::new(1)), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub deck_size: usize,
    pub players: Vector<PlayerView>,
    pub current_turn: PlayerId,
    pub turn_number: u32,
    pub round: u32,
    pub local_player: PlayerId,
    pub winner: Option<PlayerId>,
    pub pending: Option<PendingPlay>,
}

impl GameSnapshot {
    /// Get one seat's view.
    #[must_use]
    pub fn player(&self, seat: PlayerId) -> Option<&PlayerView> {
        self.players.get(seat.index())
    }

    /// The local seat's view.
    #[must_use]
    pub fn local(&self) -> Option<&PlayerView> {
        self.player(self.local_player)
    }

    /// A seat's holding hand, if `viewer` is allowed to see it.
    ///
    /// Only the owner sees a holding hand; eliminated seats hold nothing,
    /// their cards are on the discard pile.
    #[must_use]
    pub fn visible_holding(&self, viewer: PlayerId, seat: PlayerId) -> Option<&Vector<Card>> {
        if viewer != seat {
            return None;
        }
        self.player(seat).map(|p| &p.holding)
    }

    /// Number of cards a seat holds (public knowledge).
    #[must_use]
    pub fn holding_size(&self, seat: PlayerId) -> Option<usize> {
        self.player(seat).map(|p| p.holding.len())
    }

    /// Seats still in the round.
    #[must_use]
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| !p.is_out)
            .map(|p| p.seat)
            .collect()
    }

    /// Cards in the deck and all hands.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck_size
            + self
                .players
                .iter()
                .map(|p| p.holding.len() + p.discard.len())
                .sum::<usize>()
    }
}
