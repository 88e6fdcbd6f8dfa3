//! Engine commands and their history records.
//!
//! A command is one complete request from the presentation layer. The
//! engine accepts one command at a time, applies it fully, and records it:
//! - `DealOne` = draw into one seat's holding hand (random seat if `None`)
//! - `DealAll` = one card to every seat in seat order
//! - `Play` = play a card with optional target and guess
//! - `ResetRound` = return every card to a fresh deck

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{CardId, Rank};

/// A complete engine command.
///
/// ```
/// use hidden_hand::cards::{CardId, Rank};
/// use hidden_hand::core::{Command, PlayerId};
///
/// let guess = Command::play(PlayerId::new(0), CardId::new(3))
///     .with_target(PlayerId::new(2))
///     .with_guess(Rank::new(3));
/// assert!(guess.is_play());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Deal one card. `None` picks a seat uniformly at random.
    DealOne { to: Option<PlayerId> },

    /// Deal one card to every seat in seat order.
    DealAll,

    /// Play a card from the acting seat's holding hand.
    Play {
        acting: PlayerId,
        card: CardId,
        target: Option<PlayerId>,
        guess: Option<Rank>,
    },

    /// Return every card to the deck and clear all flags.
    ResetRound,
}

impl Command {
    /// Create a play command with no parameters.
    #[must_use]
    pub fn play(acting: PlayerId, card: CardId) -> Self {
        Self::Play {
            acting,
            card,
            target: None,
            guess: None,
        }
    }

    /// Set the target of a play command (builder pattern).
    ///
    /// Has no effect on other commands.
    #[must_use]
    pub fn with_target(mut self, player: PlayerId) -> Self {
        if let Self::Play { target, .. } = &mut self {
            *target = Some(player);
        }
        self
    }

    /// Set the guessed rank of a play command (builder pattern).
    ///
    /// Has no effect on other commands.
    #[must_use]
    pub fn with_guess(mut self, rank: Rank) -> Self {
        if let Self::Play { guess, .. } = &mut self {
            *guess = Some(rank);
        }
        self
    }

    /// Check if this is a play command.
    #[must_use]
    pub fn is_play(&self) -> bool {
        matches!(self, Self::Play { .. })
    }

    /// Short name for history listings.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DealOne { .. } => "deal_one",
            Self::DealAll => "deal_all",
            Self::Play { .. } => "play_card",
            Self::ResetRound => "reset_round",
        }
    }
}

/// A completed command with its position in the session history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The command that completed.
    pub command: Command,

    /// Round number the command completed in (starts at 1).
    pub round: u32,

    /// Session-wide sequence number (for ordering).
    pub sequence: u64,
}

impl CommandRecord {
    /// Create a new command record.
    #[must_use]
    pub fn new(command: Command, round: u32, sequence: u64) -> Self {
        Self {
            command,
            round,
            sequence,
        }
    }
}
