//! Error types for engine operations.
//!
//! Every failing operation returns one of these and leaves the deck, the
//! hands, and the seat flags exactly as they were before the call.

use std::fmt;

use crate::cards::{CardId, Rank};
use crate::core::{PlayerId, RosterId};

/// Which parameter a play was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingParam {
    /// The rank needs a target seat.
    Target,
    /// The rank needs a guessed rank.
    Guess,
}

impl fmt::Display for MissingParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingParam::Target => write!(f, "target player"),
            MissingParam::Guess => write!(f, "guessed rank"),
        }
    }
}

/// Failures reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No cards remain, even after recycling the discard piles.
    EmptyDeck,
    /// The card is not in the seat's holding hand.
    CardNotFound {
        /// Seat whose hand was searched.
        player: PlayerId,
        /// The card that was asked for.
        card: CardId,
    },
    /// The rank's parameter shape was not satisfied.
    MissingParameter {
        /// Rank being played.
        rank: Rank,
        /// The parameter that was absent.
        missing: MissingParam,
    },
    /// The rank takes no parameter of the kind supplied.
    UnexpectedParameter {
        /// Rank being played.
        rank: Rank,
    },
    /// The target is not among the rank's legal targets.
    IllegalTarget {
        /// Rank being played.
        rank: Rank,
        /// The rejected target.
        target: PlayerId,
    },
    /// The guessed rank is not guessable.
    IllegalGuess {
        /// Rank being played.
        rank: Rank,
        /// The rejected guess.
        guessed: Rank,
    },
    /// The local roster id is not in the roster.
    InvalidRosterId(RosterId),
    /// Two roster entries share an id.
    DuplicateRosterId(RosterId),
    /// The roster itself cannot seat a game.
    InvalidRoster(&'static str),
    /// No seat with this index.
    UnknownPlayer(PlayerId),
    /// The effect table has no entry for this rank.
    UnknownRank(Rank),
    /// The effect table cannot be used.
    InvalidEffectTable(&'static str),
    /// It is another seat's turn.
    NotYourTurn {
        /// Seat holding the turn.
        expected: PlayerId,
        /// Seat that tried to act.
        actual: PlayerId,
    },
    /// The seat has been eliminated this round.
    PlayerOut(PlayerId),
    /// Another card in hand must be played instead.
    ForcedPlay {
        /// The card the rules require.
        must_play: CardId,
    },
    /// The round has a winner; reset before playing again.
    RoundOver {
        /// The last active seat.
        winner: PlayerId,
    },
    /// No card is selected for a two-step play.
    NoPendingPlay,
}

impl EngineError {
    /// Stable reason code for the presentation layer.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::EmptyDeck => "empty_deck",
            EngineError::CardNotFound { .. } => "card_not_found",
            EngineError::MissingParameter { .. } => "missing_parameter",
            EngineError::UnexpectedParameter { .. } => "unexpected_parameter",
            EngineError::IllegalTarget { .. } => "illegal_target",
            EngineError::IllegalGuess { .. } => "illegal_guess",
            EngineError::InvalidRosterId(_) => "invalid_roster_id",
            EngineError::DuplicateRosterId(_) => "duplicate_roster_id",
            EngineError::InvalidRoster(_) => "invalid_roster",
            EngineError::UnknownPlayer(_) => "unknown_player",
            EngineError::UnknownRank(_) => "unknown_rank",
            EngineError::InvalidEffectTable(_) => "invalid_effect_table",
            EngineError::NotYourTurn { .. } => "not_your_turn",
            EngineError::PlayerOut(_) => "player_out",
            EngineError::ForcedPlay { .. } => "forced_play",
            EngineError::RoundOver { .. } => "round_over",
            EngineError::NoPendingPlay => "no_pending_play",
        }
    }

    /// Whether the caller can fix the request and retry.
    ///
    /// Construction failures and desynchronized snapshots are not
    /// recoverable by retrying the same session.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            EngineError::CardNotFound { .. }
                | EngineError::InvalidRosterId(_)
                | EngineError::DuplicateRosterId(_)
                | EngineError::InvalidRoster(_)
                | EngineError::UnknownRank(_)
                | EngineError::InvalidEffectTable(_)
        )
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::EmptyDeck => write!(f, "the deck is empty"),
            EngineError::CardNotFound { player, card } => {
                write!(f, "{card} is not in the holding hand of {player}")
            }
            EngineError::MissingParameter { rank, missing } => {
                write!(f, "{rank} requires a {missing}")
            }
            EngineError::UnexpectedParameter { rank } => {
                write!(f, "{rank} takes no such parameter")
            }
            EngineError::IllegalTarget { rank, target } => {
                write!(f, "{target} is not a legal target for {rank}")
            }
            EngineError::IllegalGuess { rank, guessed } => {
                write!(f, "{guessed} cannot be guessed with {rank}")
            }
            EngineError::InvalidRosterId(id) => write!(f, "{id} is not in the roster"),
            EngineError::DuplicateRosterId(id) => write!(f, "{id} appears twice in the roster"),
            EngineError::InvalidRoster(reason) => write!(f, "invalid roster: {reason}"),
            EngineError::UnknownPlayer(player) => write!(f, "no such seat: {player}"),
            EngineError::UnknownRank(rank) => write!(f, "no effect defined for {rank}"),
            EngineError::InvalidEffectTable(reason) => write!(f, "invalid effect table: {reason}"),
            EngineError::NotYourTurn { expected, actual } => {
                write!(f, "{actual} acted during the turn of {expected}")
            }
            EngineError::PlayerOut(player) => write!(f, "{player} is out of the round"),
            EngineError::ForcedPlay { must_play } => write!(f, "{must_play} must be played"),
            EngineError::RoundOver { winner } => write!(f, "the round is over, won by {winner}"),
            EngineError::NoPendingPlay => write!(f, "no card is selected"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
