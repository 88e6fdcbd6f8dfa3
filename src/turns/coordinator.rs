//! Turn sequencing over a fixed seat order.
//!
//! The turn passes to the next seat (wrapping) whose player is still in
//! the round. Eliminated seats are skipped, never removed, so the order
//! itself never changes. When only one active seat remains the round is
//! over and `advance` reports the winner instead of moving.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::players::PlayerRegistry;

/// Result of advancing the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAdvance {
    /// The turn passed to this seat.
    Next(PlayerId),
    /// One active seat remains.
    RoundOver {
        /// The remaining seat.
        winner: PlayerId,
    },
}

/// Tracks whose turn it is.
///
/// ## Example
///
/// ```
/// use hidden_hand::core::{PlayerId, RosterEntry, RosterId};
/// use hidden_hand::players::PlayerRegistry;
/// use hidden_hand::turns::{TurnAdvance, TurnCoordinator};
///
/// let roster: Vec<_> = (1..=3)
///     .map(|i| RosterEntry::new(RosterId::new(i), format!("P{i}")))
///     .collect();
/// let mut registry = PlayerRegistry::from_roster(&roster).unwrap();
/// let mut turns = TurnCoordinator::new(&registry);
///
/// registry.set_out(PlayerId::new(1), true).unwrap();
/// assert_eq!(turns.advance(&registry), TurnAdvance::Next(PlayerId::new(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCoordinator {
    current: PlayerId,
    seat_count: usize,
    turn_number: u32,
}

impl TurnCoordinator {
    /// Start at the first active seat.
    #[must_use]
    pub fn new(registry: &PlayerRegistry) -> Self {
        let current = registry
            .active_players()
            .first()
            .copied()
            .unwrap_or(PlayerId::new(0));

        Self {
            current,
            seat_count: registry.seat_count(),
            turn_number: 1,
        }
    }

    /// Seat holding the turn.
    #[must_use]
    pub fn current(&self) -> PlayerId {
        self.current
    }

    /// Turns taken this round, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Pass the turn to the next active seat.
    ///
    /// Leaves the turn where it is if the round is over.
    pub fn advance(&mut self, registry: &PlayerRegistry) -> TurnAdvance {
        if let Some(winner) = Self::round_result(registry) {
            return TurnAdvance::RoundOver { winner };
        }

        let mut seat = self.current;
        for _ in 0..self.seat_count {
            seat = seat.next(self.seat_count);
            if registry.get(seat).is_ok_and(|p| p.is_active()) {
                break;
            }
        }

        self.current = seat;
        self.turn_number += 1;
        TurnAdvance::Next(seat)
    }

    /// The winner, if exactly one active seat remains.
    #[must_use]
    pub fn round_result(registry: &PlayerRegistry) -> Option<PlayerId> {
        let active = registry.active_players();
        match active.as_slice() {
            [winner] => Some(*winner),
            _ => None,
        }
    }

    /// Give the turn to `first` and restart the count.
    pub fn reset(&mut self, first: PlayerId) {
        self.current = first;
        self.turn_number = 1;
    }
}
