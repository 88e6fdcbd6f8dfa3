//! Effect resolution: validating a play and applying it to game state.
//!
//! Resolution is split in two so a play is atomic:
//!
//! - `validate` reads the state and checks the card, the forced-play rule,
//!   the parameter shape, the target and the guess
//! - `apply` moves the card to the discard pile and carries out the effect
//!
//! Nothing is mutated until every check has passed.

use smallvec::SmallVec;

use super::descriptor::{EffectDescriptor, EffectKind};
use super::table::EffectTable;
use super::targeting::legal_targets;
use crate::cards::{Card, CardId, Rank};
use crate::core::PlayerId;
use crate::engine::GameState;
use crate::error::{EngineError, EngineResult, MissingParam};
use crate::events::GameEvent;
use crate::players::PlayerRegistry;
use crate::zones::HandRole;

/// A play as requested by a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayRequest {
    /// Seat playing the card.
    pub acting: PlayerId,
    /// Card from the acting seat's holding hand.
    pub card: CardId,
    /// Target seat, for ranks that take one.
    pub target: Option<PlayerId>,
    /// Guessed rank, for ranks that take one.
    pub guess: Option<Rank>,
}

impl PlayRequest {
    /// Create a request with no parameters.
    #[must_use]
    pub fn new(acting: PlayerId, card: CardId) -> Self {
        Self {
            acting,
            card,
            target: None,
            guess: None,
        }
    }

    /// Set the target (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: PlayerId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the guessed rank (builder pattern).
    #[must_use]
    pub fn with_guess(mut self, guess: Rank) -> Self {
        self.guess = Some(guess);
        self
    }
}

/// A request that passed validation. Only `validate` creates these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedPlay {
    request: PlayRequest,
    rank: Rank,
}

impl ValidatedPlay {
    /// The validated request.
    #[must_use]
    pub fn request(&self) -> &PlayRequest {
        &self.request
    }

    /// Rank of the card being played.
    #[must_use]
    pub fn rank(&self) -> Rank {
        self.rank
    }
}

/// What a resolved play did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Rank that was played.
    pub rank: Rank,

    /// Card that was played.
    pub card: CardId,

    /// Target the play named, if any.
    pub target: Option<PlayerId>,

    /// Seats eliminated by this play, in the order it happened.
    pub eliminated: SmallVec<[PlayerId; 2]>,

    /// Whether the guess was right, for guessing ranks.
    pub guess_correct: Option<bool>,

    /// Cards shown to the acting seat.
    pub revealed: SmallVec<[Card; 2]>,

    /// Highest held ranks of (acting, target), for comparing ranks.
    pub compared: Option<(Rank, Rank)>,

    /// The acting seat became safe.
    pub safety_granted: bool,

    /// The play had no effect (self-targeted, or nothing to compare).
    pub fizzled: bool,

    /// Set by the engine when this play ended the round.
    pub winner: Option<PlayerId>,
}

impl PlayOutcome {
    fn new(play: &ValidatedPlay) -> Self {
        Self {
            rank: play.rank,
            card: play.request.card,
            target: play.request.target,
            eliminated: SmallVec::new(),
            guess_correct: None,
            revealed: SmallVec::new(),
            compared: None,
            safety_granted: false,
            fizzled: false,
            winner: None,
        }
    }

    /// Check if anyone was eliminated.
    #[must_use]
    pub fn any_eliminated(&self) -> bool {
        !self.eliminated.is_empty()
    }
}

/// Validates and applies plays against an effect table.
pub struct EffectResolver;

impl EffectResolver {
    /// Check a play against the current state without changing it.
    ///
    /// Turn order and round status are the engine's concern; this checks
    /// everything about the card and its parameters.
    pub fn validate(
        table: &EffectTable,
        registry: &PlayerRegistry,
        request: &PlayRequest,
    ) -> EngineResult<ValidatedPlay> {
        let rank = Self::check_selection(table, registry, request.acting, request.card)?;
        let descriptor = table.descriptor(rank)?;

        match (descriptor.shape.needs_target(), request.target) {
            (true, None) => {
                return Err(EngineError::MissingParameter {
                    rank,
                    missing: MissingParam::Target,
                })
            }
            (false, Some(_)) => return Err(EngineError::UnexpectedParameter { rank }),
            _ => {}
        }
        match (descriptor.shape.needs_guess(), request.guess) {
            (true, None) => {
                return Err(EngineError::MissingParameter {
                    rank,
                    missing: MissingParam::Guess,
                })
            }
            (false, Some(_)) => return Err(EngineError::UnexpectedParameter { rank }),
            _ => {}
        }

        if let Some(target) = request.target {
            let legal = legal_targets(table, registry, request.acting, rank)?;
            if !legal.contains(&target) {
                return Err(EngineError::IllegalTarget { rank, target });
            }
        }
        if let Some(guessed) = request.guess {
            if !table.get(guessed).is_some_and(|d| d.guessable) {
                return Err(EngineError::IllegalGuess { rank, guessed });
            }
        }

        Ok(ValidatedPlay {
            request: *request,
            rank,
        })
    }

    /// Check that `card` may be chosen by `acting`. Returns its rank.
    ///
    /// Covers card origin and the forced-play rule, the part of validation
    /// that does not depend on parameters.
    pub fn check_selection(
        table: &EffectTable,
        registry: &PlayerRegistry,
        acting: PlayerId,
        card: CardId,
    ) -> EngineResult<Rank> {
        let holding = registry.hand(acting, HandRole::Holding)?;
        let chosen = holding
            .get(card)
            .ok_or(EngineError::CardNotFound {
                player: acting,
                card,
            })?;
        table.descriptor(chosen.rank)?;

        if let Some(must_play) = Self::forced_card(table, registry, acting)? {
            let forced_rank = holding.get(must_play).map(|c| c.rank);
            if must_play != card && forced_rank != Some(chosen.rank) {
                return Err(EngineError::ForcedPlay { must_play });
            }
        }

        Ok(chosen.rank)
    }

    /// The card `acting` is obliged to play, if any.
    ///
    /// A card is forced when another card in the same hand has a rank in
    /// its `forced_by` list.
    pub fn forced_card(
        table: &EffectTable,
        registry: &PlayerRegistry,
        acting: PlayerId,
    ) -> EngineResult<Option<CardId>> {
        let holding = registry.hand(acting, HandRole::Holding)?;
        for card in holding.iter() {
            let Some(descriptor) = table.get(card.rank) else {
                continue;
            };
            if descriptor.forced_by.is_empty() {
                continue;
            }
            let forced = holding
                .iter()
                .any(|other| other.id != card.id && descriptor.forced_by.contains(&other.rank));
            if forced {
                return Ok(Some(card.id));
            }
        }
        Ok(None)
    }

    /// Carry out a validated play.
    ///
    /// Moves the card face up onto the acting seat's discard pile, then
    /// applies the rank's effect. Events are appended in order.
    pub fn apply(
        table: &EffectTable,
        state: &mut GameState,
        play: ValidatedPlay,
        events: &mut Vec<GameEvent>,
    ) -> EngineResult<PlayOutcome> {
        let request = play.request;
        let acting = request.acting;
        let descriptor = table.descriptor(play.rank)?;

        let card = state
            .registry
            .hand_mut(acting, HandRole::Holding)?
            .remove(request.card)?;
        state.registry.discard_face_up(acting, card)?;
        events.push(GameEvent::Played {
            acting,
            card: request.card,
            rank: play.rank,
            target: request.target,
            guess: request.guess,
        });

        let mut outcome = PlayOutcome::new(&play);

        if request.target == Some(acting) && !descriptor.may_target_self {
            outcome.fizzled = true;
            return Ok(outcome);
        }

        Self::apply_effect(table, descriptor, state, &play, &mut outcome, events)?;
        Ok(outcome)
    }

    /// Validate and apply in one step.
    pub fn resolve(
        table: &EffectTable,
        state: &mut GameState,
        request: &PlayRequest,
        events: &mut Vec<GameEvent>,
    ) -> EngineResult<PlayOutcome> {
        let play = Self::validate(table, &state.registry, request)?;
        Self::apply(table, state, play, events)
    }

    fn apply_effect(
        table: &EffectTable,
        descriptor: &EffectDescriptor,
        state: &mut GameState,
        play: &ValidatedPlay,
        outcome: &mut PlayOutcome,
        events: &mut Vec<GameEvent>,
    ) -> EngineResult<()> {
        let acting = play.request.acting;
        let target = play.request.target;

        match (descriptor.kind, target) {
            (EffectKind::GuessAndEliminate, Some(target)) => {
                let correct = match play.request.guess {
                    Some(guess) => state
                        .registry
                        .hand(target, HandRole::Holding)?
                        .has_rank(guess),
                    None => false,
                };
                outcome.guess_correct = Some(correct);
                if correct {
                    Self::eliminate(state, target, outcome, events)?;
                }
            }

            (EffectKind::PeekAtHand, Some(target)) => {
                let cards: Vec<Card> = state
                    .registry
                    .hand(target, HandRole::Holding)?
                    .iter()
                    .cloned()
                    .collect();
                outcome.revealed.extend(cards.iter().cloned());
                events.push(GameEvent::HandRevealed {
                    viewer: acting,
                    owner: target,
                    cards,
                });
            }

            (EffectKind::CompareHands, Some(target)) => {
                let mine = state.registry.hand(acting, HandRole::Holding)?.highest_rank();
                let theirs = state.registry.hand(target, HandRole::Holding)?.highest_rank();
                let (Some(mine), Some(theirs)) = (mine, theirs) else {
                    outcome.fizzled = true;
                    return Ok(());
                };

                outcome.compared = Some((mine, theirs));
                events.push(GameEvent::HandsCompared {
                    acting,
                    target,
                    acting_rank: mine,
                    target_rank: theirs,
                });
                if mine < theirs {
                    Self::eliminate(state, acting, outcome, events)?;
                } else if theirs < mine {
                    Self::eliminate(state, target, outcome, events)?;
                }
            }

            (EffectKind::ForceDiscard, Some(target)) => {
                let discarded = state
                    .registry
                    .hand_mut(target, HandRole::Holding)?
                    .drain_all();
                let loses = discarded.iter().any(|c| table.eliminates_on_discard(c.rank));
                for card in &discarded {
                    state.registry.discard_face_up(target, card.clone())?;
                }

                let mut replacement = None;
                if !loses {
                    let mut keep: SmallVec<[CardId; 4]> = SmallVec::new();
                    keep.push(play.request.card);
                    keep.extend(discarded.iter().map(|c| c.id));
                    match state.draw_keeping(&keep, events) {
                        Ok(card) => {
                            replacement = Some(card.id);
                            state.registry.hand_mut(target, HandRole::Holding)?.add(card);
                        }
                        Err(EngineError::EmptyDeck) => {}
                        Err(e) => return Err(e),
                    }
                }

                events.push(GameEvent::ForcedDiscard {
                    player: target,
                    discarded: discarded.into_iter().map(face_up).collect(),
                    replacement,
                });
                if loses {
                    Self::eliminate(state, target, outcome, events)?;
                }
            }

            (EffectKind::TradeHands, Some(target)) => {
                state.registry.swap_holdings(acting, target)?;
                events.push(GameEvent::HandsTraded { acting, target });
            }

            (EffectKind::EliminateTarget, Some(target)) => {
                Self::eliminate(state, target, outcome, events)?;
            }

            (EffectKind::GrantSafety, _) => {
                state.registry.set_safety(acting, true)?;
                outcome.safety_granted = true;
                events.push(GameEvent::SafetyGranted { player: acting });
            }

            (EffectKind::EliminateOnDiscard, _) => {
                Self::eliminate(state, acting, outcome, events)?;
            }

            // Targeted kinds always carry a target once the table is validated.
            (_, None) | (EffectKind::NoEffect, _) => {}
        }

        Ok(())
    }

    fn eliminate(
        state: &mut GameState,
        player: PlayerId,
        outcome: &mut PlayOutcome,
        events: &mut Vec<GameEvent>,
    ) -> EngineResult<()> {
        let revealed = state.registry.set_out(player, true)?;
        outcome.eliminated.push(player);
        events.push(GameEvent::Eliminated { player, revealed });
        Ok(())
    }
}

fn face_up(mut card: Card) -> Card {
    card.flip_up();
    card
}
