//! Complete mutable game state.
//!
//! `GameState` is what the resolver mutates and what snapshots are taken
//! from. The engine owns exactly one and is the only writer.

use serde::{Deserialize, Serialize};

use super::snapshot::{GameSnapshot, PlayerView};
use crate::cards::{Card, CardId, Rank};
use crate::core::{GameConfig, GameRng, PlayerId, RandomSource};
use crate::effects::ParamShape;
use crate::error::{EngineError, EngineResult};
use crate::events::GameEvent;
use crate::players::PlayerRegistry;
use crate::turns::TurnCoordinator;
use crate::zones::Deck;

/// A card chosen for a two-step play, waiting for its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPlay {
    /// Seat that chose the card.
    pub acting: PlayerId,
    /// The chosen card.
    pub card: CardId,
    /// Its rank.
    pub rank: Rank,
    /// Parameters still to be supplied.
    pub shape: ParamShape,
}

/// Deck, seats, turn and round status.
///
/// ## Card Conservation
///
/// Cards are created once in `new` and only move between the deck and
/// the hands afterwards: `card_count()` always equals `total_cards()`.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Undealt pile.
    pub deck: Deck,

    /// Every seat with its hands and flags.
    pub registry: PlayerRegistry,

    /// Whose turn it is.
    pub turns: TurnCoordinator,

    /// The seat this engine presents as "me".
    pub local_player: PlayerId,

    /// Card chosen by `select_card`, if any.
    pub pending: Option<PendingPlay>,

    /// Set once one active seat remains.
    pub winner: Option<PlayerId>,

    /// Round number, starting at 1.
    pub round: u32,

    total_cards: usize,
    shuffle_rng: GameRng,
    deal_rng: GameRng,
}

impl GameState {
    /// Seat the roster, build and shuffle the deck.
    pub fn new(config: &GameConfig) -> EngineResult<Self> {
        let registry = PlayerRegistry::from_roster(&config.roster)?;
        let local_player = registry.lookup(config.local_player)?;
        if registry.active_count() < 2 {
            return Err(EngineError::InvalidRoster("at least two seats must start active"));
        }

        let rng = GameRng::new(config.seed);
        let mut shuffle_rng = rng.for_context("shuffle");
        let deal_rng = rng.for_context("deal");

        let mut deck = Deck::build(&config.effects, &config.deck_composition())?;
        deck.shuffle(&mut shuffle_rng);

        Ok(Self {
            total_cards: deck.len(),
            turns: TurnCoordinator::new(&registry),
            deck,
            registry,
            local_player,
            pending: None,
            winner: None,
            round: 1,
            shuffle_rng,
            deal_rng,
        })
    }

    /// Number of cards created for the session.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Cards currently in the deck and all hands.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.registry.cards_in_hands()
    }

    /// Cards a draw could reach: the deck plus every discard pile.
    #[must_use]
    pub fn drawable(&self) -> usize {
        let discards: usize = self.registry.iter().map(|(_, p)| p.discard().len()).sum();
        self.deck.len() + discards
    }

    /// Draw the top card, refilling an empty deck from the discard piles.
    ///
    /// Fails with `EmptyDeck` only when the deck and every discard pile are
    /// empty, in which case nothing changes.
    pub fn draw_with_recycle(&mut self, events: &mut Vec<GameEvent>) -> EngineResult<Card> {
        self.draw_keeping(&[], events)
    }

    /// Like `draw_with_recycle`, but cards in `keep` stay on their discard
    /// piles if a refill happens.
    ///
    /// An effect that discards and then draws passes the cards it just moved,
    /// so the draw can never hand them straight back.
    pub fn draw_keeping(
        &mut self,
        keep: &[CardId],
        events: &mut Vec<GameEvent>,
    ) -> EngineResult<Card> {
        if self.deck.is_empty() {
            let cards = self.registry.drain_discards(keep);
            if !cards.is_empty() {
                events.push(GameEvent::DeckRecycled { cards: cards.len() });
                self.deck.recycle(cards);
                self.deck.shuffle(&mut self.shuffle_rng);
            }
        }
        self.deck.draw()
    }

    /// Pick a seat uniformly at random, the local seat included.
    pub fn random_seat(&mut self) -> PlayerId {
        let index = self.deal_rng.pick_index(self.registry.seat_count());
        PlayerId::new(index as u8)
    }

    /// Check if a reset would change nothing.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.registry.cards_in_hands() == 0
            && self.registry.iter().all(|(_, p)| !p.is_out() && !p.is_safe())
            && self.turns.current() == PlayerId::new(0)
            && self.turns.turn_number() == 1
            && self.winner.is_none()
            && self.pending.is_none()
    }

    /// Return every card to the deck, clear flags, shuffle, restart turns.
    ///
    /// Returns false, changing nothing, if the state is already fresh.
    pub fn reset_round(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.is_fresh() {
            return false;
        }

        let cards = self.registry.drain_all_hands();
        self.deck.recycle(cards);
        self.deck.shuffle(&mut self.shuffle_rng);
        self.registry.clear_flags();
        self.turns.reset(PlayerId::new(0));
        self.winner = None;
        self.pending = None;
        self.round += 1;

        events.push(GameEvent::RoundReset { round: self.round });
        true
    }

    /// Immutable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let players = self
            .registry
            .iter()
            .map(|(seat, p)| PlayerView {
                seat,
                roster_id: p.roster_id,
                name: p.name.clone(),
                is_out: p.is_out(),
                is_safe: p.is_safe(),
                holding: p.holding().cards(),
                discard: p.discard().cards(),
            })
            .collect();

        GameSnapshot {
            deck_size: self.deck.len(),
            players,
            current_turn: self.turns.current(),
            turn_number: self.turns.turn_number(),
            round: self.round,
            local_player: self.local_player,
            winner: self.winner,
            pending: self.pending,
        }
    }
}
