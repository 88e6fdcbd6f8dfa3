//! Effect descriptors.
//!
//! Each rank maps to one `EffectDescriptor`, which declares the parameters
//! a play needs (`ParamShape`) and what happens when it resolves
//! (`EffectKind`). New ranks are added as table entries, never as new
//! branches in the resolver.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Rank;

/// Parameters a play must supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamShape {
    /// No parameters.
    None,
    /// A target seat.
    Target,
    /// A target seat and a guessed rank.
    TargetAndGuess,
}

impl ParamShape {
    /// Check if a target seat is required.
    #[must_use]
    pub const fn needs_target(self) -> bool {
        matches!(self, ParamShape::Target | ParamShape::TargetAndGuess)
    }

    /// Check if a guessed rank is required.
    #[must_use]
    pub const fn needs_guess(self) -> bool {
        matches!(self, ParamShape::TargetAndGuess)
    }
}

/// What a card does when played.
///
/// ## Targeted Effects
///
/// - `GuessAndEliminate`: Target is out if it holds the guessed rank
/// - `PeekAtHand`: Reveal the target's holding hand to the acting seat
/// - `CompareHands`: Lower holding rank is out; ties do nothing
/// - `ForceDiscard`: Target discards its hand face up and draws again
/// - `TradeHands`: Acting seat and target swap holding hands
/// - `EliminateTarget`: Target is out
///
/// ## Self Effects
///
/// - `GrantSafety`: Acting seat cannot be targeted
/// - `NoEffect`: Nothing happens (forced-play cards)
/// - `EliminateOnDiscard`: Whoever discards this card is out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    GuessAndEliminate,
    PeekAtHand,
    CompareHands,
    ForceDiscard,
    TradeHands,
    EliminateTarget,
    GrantSafety,
    NoEffect,
    EliminateOnDiscard,
}

impl EffectKind {
    /// The parameter shape this kind needs.
    #[must_use]
    pub const fn shape(self) -> ParamShape {
        match self {
            EffectKind::GuessAndEliminate => ParamShape::TargetAndGuess,
            EffectKind::PeekAtHand
            | EffectKind::CompareHands
            | EffectKind::ForceDiscard
            | EffectKind::TradeHands
            | EffectKind::EliminateTarget => ParamShape::Target,
            EffectKind::GrantSafety | EffectKind::NoEffect | EffectKind::EliminateOnDiscard => {
                ParamShape::None
            }
        }
    }
}

/// Static description of one rank.
///
/// ## Example
///
/// ```
/// use hidden_hand::cards::Rank;
/// use hidden_hand::effects::{EffectDescriptor, EffectKind, ParamShape};
///
/// let troll = EffectDescriptor::new(Rank::new(5), "Net Troll", EffectKind::ForceDiscard)
///     .with_copies(2)
///     .targets_self();
///
/// assert_eq!(troll.shape, ParamShape::Target);
/// assert!(troll.may_target_self);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDescriptor {
    /// Rank this entry describes.
    pub rank: Rank,

    /// Display name given to every card of this rank.
    pub name: String,

    /// Rules text (for display).
    pub description: String,

    /// Copies in the default deck composition.
    pub copies: u8,

    /// Parameters a play must supply.
    pub shape: ParamShape,

    /// What happens on resolution.
    pub kind: EffectKind,

    /// Acting seat is always a legal target of this rank.
    pub may_target_self: bool,

    /// Holding this rank together with any of these forces playing this rank.
    pub forced_by: SmallVec<[Rank; 2]>,

    /// Whether guessing effects may name this rank.
    pub guessable: bool,
}

impl EffectDescriptor {
    /// Create a descriptor with one copy and the kind's default shape.
    #[must_use]
    pub fn new(rank: Rank, name: impl Into<String>, kind: EffectKind) -> Self {
        Self {
            rank,
            name: name.into(),
            description: String::new(),
            copies: 1,
            shape: kind.shape(),
            kind,
            may_target_self: false,
            forced_by: SmallVec::new(),
            guessable: true,
        }
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the default number of copies (builder pattern).
    #[must_use]
    pub fn with_copies(mut self, copies: u8) -> Self {
        self.copies = copies;
        self
    }

    /// Allow the acting seat to target itself (builder pattern).
    #[must_use]
    pub fn targets_self(mut self) -> Self {
        self.may_target_self = true;
        self
    }

    /// Force this rank to be played when held with any of `ranks`.
    #[must_use]
    pub fn forced_by(mut self, ranks: impl IntoIterator<Item = Rank>) -> Self {
        self.forced_by.extend(ranks);
        self
    }

    /// Exclude this rank from guesses (builder pattern).
    #[must_use]
    pub fn not_guessable(mut self) -> Self {
        self.guessable = false;
        self
    }
}
