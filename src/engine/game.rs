//! The game engine: the single entry point for the presentation layer.
//!
//! ## Operations
//!
//! - `deal_one` / `deal_all`: Move cards from the deck into holding hands
//! - `play_card`: Play a card and resolve its effect, then pass the turn
//! - `select_card` / `play_pending`: The same play in two steps
//! - `reset_round`: Return every card to a fresh deck
//!
//! Every operation either completes or fails with no state change. Each
//! completed operation is recorded in the history and published to
//! subscribers with a snapshot of the resulting state.

use im::Vector;

use super::snapshot::GameSnapshot;
use super::state::{GameState, PendingPlay};
use crate::cards::{Card, CardId, Rank};
use crate::core::{Command, CommandRecord, GameConfig, PlayerId, SafetyDuration};
use crate::effects::{
    guessable_ranks, legal_targets, EffectResolver, EffectTable, ParamShape, PlayOutcome,
    PlayRequest,
};
use crate::error::{EngineError, EngineResult};
use crate::events::{EventBus, GameEvent, Notification, Subscriber, SubscriptionId};
use crate::players::{Player, SeatList};
use crate::turns::TurnAdvance;
use crate::zones::HandRole;

/// Result of `GameEngine::execute`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Cards dealt, in deal order.
    Dealt(Vec<Card>),
    /// A resolved play.
    Played(PlayOutcome),
    /// Whether the reset changed anything.
    Reset(bool),
}

/// Owns the game state and serializes every change to it.
///
/// ## Example
///
/// ```
/// use hidden_hand::core::{GameConfig, RosterEntry, RosterId};
/// use hidden_hand::engine::GameEngine;
///
/// let config = GameConfig::builder()
///     .seats((1..=4).map(|i| RosterEntry::new(RosterId::new(i), format!("P{i}"))))
///     .build();
/// let mut engine = GameEngine::new(config).unwrap();
///
/// engine.deal_all().unwrap();
/// assert_eq!(engine.deck_size(), 12);
/// ```
#[derive(Debug)]
pub struct GameEngine {
    effects: EffectTable,
    safety: SafetyDuration,
    state: GameState,
    bus: EventBus,
    history: Vector<GameEvent>,
    commands: Vector<CommandRecord>,
    sequence: u64,
}

impl GameEngine {
    /// Validate the configuration and set up the first round.
    pub fn new(mut config: GameConfig) -> EngineResult<Self> {
        config.effects = EffectTable::new(config.effects.iter().cloned().collect())?;
        let state = GameState::new(&config)?;

        Ok(Self {
            effects: config.effects,
            safety: config.safety,
            state,
            bus: EventBus::new(),
            history: Vector::new(),
            commands: Vector::new(),
            sequence: 0,
        })
    }

    // === Operations ===

    /// Deal the top card into a seat's holding hand, face down.
    ///
    /// With `None` the seat is chosen uniformly at random among all seats.
    pub fn deal_one(&mut self, to: Option<PlayerId>) -> EngineResult<Card> {
        if let Some(player) = to {
            self.state.registry.get(player)?;
        }

        let mut events = Vec::new();
        let card = self.state.draw_with_recycle(&mut events)?;
        let seat = match to {
            Some(player) => player,
            None => self.state.random_seat(),
        };

        self.state
            .registry
            .hand_mut(seat, HandRole::Holding)?
            .add(card.clone());
        events.push(GameEvent::Dealt {
            to: seat,
            card: card.id,
        });

        self.publish(Command::DealOne { to }, events);
        Ok(card)
    }

    /// Deal one card to every seat in seat order.
    ///
    /// Fails with `EmptyDeck`, dealing nothing, if there are not enough
    /// cards for everyone even after recycling discards.
    pub fn deal_all(&mut self) -> EngineResult<Vec<Card>> {
        let seats = self.state.registry.seat_count();
        if self.state.drawable() < seats {
            return Err(EngineError::EmptyDeck);
        }

        let mut events = Vec::new();
        let mut dealt = Vec::with_capacity(seats);
        for seat in PlayerId::all(seats) {
            let card = self.state.draw_with_recycle(&mut events)?;
            self.state
                .registry
                .hand_mut(seat, HandRole::Holding)?
                .add(card.clone());
            events.push(GameEvent::Dealt {
                to: seat,
                card: card.id,
            });
            dealt.push(card);
        }

        self.publish(Command::DealAll, events);
        Ok(dealt)
    }

    /// Play a card from `acting`'s holding hand.
    ///
    /// Validates the turn, the card, and the parameters before anything
    /// moves. On success the turn passes to the next active seat, or the
    /// round ends and `PlayOutcome::winner` is set.
    pub fn play_card(
        &mut self,
        acting: PlayerId,
        card: CardId,
        target: Option<PlayerId>,
        guess: Option<Rank>,
    ) -> EngineResult<PlayOutcome> {
        let request = PlayRequest {
            acting,
            card,
            target,
            guess,
        };

        self.check_can_act(acting)?;
        let play = EffectResolver::validate(&self.effects, &self.state.registry, &request)?;

        let mut events = Vec::new();
        let mut outcome = EffectResolver::apply(&self.effects, &mut self.state, play, &mut events)?;
        self.state.pending = None;
        outcome.winner = self.finish_turn(&mut events)?;

        self.publish(
            Command::Play {
                acting,
                card,
                target,
                guess,
            },
            events,
        );
        Ok(outcome)
    }

    /// Return every card to a fresh shuffled deck and clear all flags.
    ///
    /// Returns false and records nothing if the round is already fresh.
    pub fn reset_round(&mut self) -> bool {
        let mut events = Vec::new();
        if !self.state.reset_round(&mut events) {
            return false;
        }
        self.publish(Command::ResetRound, events);
        true
    }

    /// Run a command.
    pub fn execute(&mut self, command: Command) -> EngineResult<CommandOutcome> {
        match command {
            Command::DealOne { to } => Ok(CommandOutcome::Dealt(vec![self.deal_one(to)?])),
            Command::DealAll => Ok(CommandOutcome::Dealt(self.deal_all()?)),
            Command::Play {
                acting,
                card,
                target,
                guess,
            } => Ok(CommandOutcome::Played(
                self.play_card(acting, card, target, guess)?,
            )),
            Command::ResetRound => Ok(CommandOutcome::Reset(self.reset_round())),
        }
    }

    // === Two-step play ===

    /// Choose a card and report which parameters it still needs.
    ///
    /// Replaces any earlier selection.
    pub fn select_card(&mut self, acting: PlayerId, card: CardId) -> EngineResult<ParamShape> {
        self.check_can_act(acting)?;
        let rank = EffectResolver::check_selection(&self.effects, &self.state.registry, acting, card)?;
        let shape = self.effects.descriptor(rank)?.shape;

        self.state.pending = Some(PendingPlay {
            acting,
            card,
            rank,
            shape,
        });
        Ok(shape)
    }

    /// Play the selected card with its parameters.
    ///
    /// On failure the selection stays so the caller can retry.
    pub fn play_pending(
        &mut self,
        target: Option<PlayerId>,
        guess: Option<Rank>,
    ) -> EngineResult<PlayOutcome> {
        let pending = self.state.pending.ok_or(EngineError::NoPendingPlay)?;
        self.play_card(pending.acting, pending.card, target, guess)
    }

    /// Drop the selection, if any.
    pub fn cancel_pending(&mut self) -> Option<PendingPlay> {
        self.state.pending.take()
    }

    /// The current selection.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingPlay> {
        self.state.pending.as_ref()
    }

    // === Queries ===

    /// Legal targets of `rank` for the local seat.
    pub fn legal_targets(&self, rank: Rank) -> EngineResult<SeatList> {
        self.legal_targets_for(self.state.local_player, rank)
    }

    /// Legal targets of `rank` for any seat.
    pub fn legal_targets_for(&self, player: PlayerId, rank: Rank) -> EngineResult<SeatList> {
        legal_targets(&self.effects, &self.state.registry, player, rank)
    }

    /// Ranks a guessing card may name.
    #[must_use]
    pub fn guessable_ranks(&self) -> Vec<Rank> {
        guessable_ranks(&self.effects)
    }

    /// The card `player` must play next, if the forced-play rule applies.
    pub fn forced_card(&self, player: PlayerId) -> EngineResult<Option<CardId>> {
        EffectResolver::forced_card(&self.effects, &self.state.registry, player)
    }

    /// Immutable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Cards left in the deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.state.deck.len()
    }

    /// Number of cards created for the session.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.state.total_cards()
    }

    /// Get a seat.
    pub fn player(&self, player: PlayerId) -> EngineResult<&Player> {
        self.state.registry.get(player)
    }

    /// The local seat.
    #[must_use]
    pub fn local_player(&self) -> PlayerId {
        self.state.local_player
    }

    /// Seat holding the turn.
    #[must_use]
    pub fn current_turn(&self) -> PlayerId {
        self.state.turns.current()
    }

    /// The round's winner, once one active seat remains.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    /// Current round number, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round
    }

    /// Every event so far, oldest first.
    ///
    /// The history spans the whole session and is not cleared by
    /// `reset_round`; a `RoundReset` event marks each round boundary.
    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    /// Every completed command, oldest first.
    ///
    /// Kept for the whole session so it can be replayed from the seed.
    /// Each record carries the round it ran in.
    #[must_use]
    pub fn commands(&self) -> &Vector<CommandRecord> {
        &self.commands
    }

    /// The effect table in use.
    #[must_use]
    pub fn effects(&self) -> &EffectTable {
        &self.effects
    }

    /// Read-only access to the full state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    // === Subscribers ===

    /// Receive a notification after every completed operation.
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        self.bus.subscribe(subscriber)
    }

    /// Stop notifying a subscriber.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // === Internals ===

    fn check_can_act(&self, acting: PlayerId) -> EngineResult<()> {
        if let Some(winner) = self.state.winner {
            return Err(EngineError::RoundOver { winner });
        }
        if self.state.registry.get(acting)?.is_out() {
            return Err(EngineError::PlayerOut(acting));
        }
        let expected = self.state.turns.current();
        if expected != acting {
            return Err(EngineError::NotYourTurn {
                expected,
                actual: acting,
            });
        }
        Ok(())
    }

    fn finish_turn(&mut self, events: &mut Vec<GameEvent>) -> EngineResult<Option<PlayerId>> {
        match self.state.turns.advance(&self.state.registry) {
            TurnAdvance::Next(seat) => {
                events.push(GameEvent::TurnAdvanced {
                    to: seat,
                    turn: self.state.turns.turn_number(),
                });
                if self.safety == SafetyDuration::UntilOwnTurn
                    && self.state.registry.get(seat)?.is_safe()
                {
                    self.state.registry.set_safety(seat, false)?;
                    events.push(GameEvent::SafetyExpired { player: seat });
                }
                Ok(None)
            }
            TurnAdvance::RoundOver { winner } => {
                self.state.winner = Some(winner);
                events.push(GameEvent::RoundOver { winner });
                Ok(Some(winner))
            }
        }
    }

    fn publish(&mut self, command: Command, events: Vec<GameEvent>) {
        self.sequence += 1;
        self.commands.push_back(CommandRecord::new(
            command.clone(),
            self.state.round,
            self.sequence,
        ));
        self.history.extend(events.iter().cloned());

        if !self.bus.is_empty() {
            let notification = Notification {
                sequence: self.sequence,
                command,
                events,
                snapshot: self.state.snapshot(),
            };
            self.bus.publish(&notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeckComposition, RosterEntry, RosterId};

    fn engine(seats: u64) -> GameEngine {
        let config = GameConfig::builder()
            .seats((1..=seats).map(|i| RosterEntry::new(RosterId::new(i), format!("P{i}"))))
            .build();
        GameEngine::new(config).unwrap()
    }

    fn holding(engine: &GameEngine, seat: PlayerId) -> Vec<Card> {
        engine.player(seat).unwrap().holding().iter().cloned().collect()
    }

    #[test]
    fn test_deal_one_to_seat() {
        let mut engine = engine(3);
        let card = engine.deal_one(Some(PlayerId::new(2))).unwrap();

        assert!(!card.is_face_up());
        assert_eq!(holding(&engine, PlayerId::new(2)), vec![card]);
        assert_eq!(engine.deck_size(), 15);
        assert_eq!(engine.commands().len(), 1);
    }

    #[test]
    fn test_deal_one_unknown_seat() {
        let mut engine = engine(3);
        assert_eq!(
            engine.deal_one(Some(PlayerId::new(9))).unwrap_err(),
            EngineError::UnknownPlayer(PlayerId::new(9))
        );
        assert_eq!(engine.deck_size(), 16);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_deal_one_random_seat() {
        let mut engine = engine(4);
        engine.deal_one(None).unwrap();

        let held: usize = engine
            .state()
            .registry
            .iter()
            .map(|(_, p)| p.holding().len())
            .sum();
        assert_eq!(held, 1);
    }

    #[test]
    fn test_deal_all_needs_a_card_per_seat() {
        let config = GameConfig::builder()
            .seats((1..=3).map(|i| RosterEntry::new(RosterId::new(i), format!("P{i}"))))
            .deck(DeckComposition::new([(Rank::new(1), 2)]))
            .build();
        let mut engine = GameEngine::new(config).unwrap();

        assert_eq!(engine.deal_all().unwrap_err(), EngineError::EmptyDeck);
        assert_eq!(engine.deck_size(), 2);
    }

    #[test]
    fn test_not_your_turn() {
        let mut engine = engine(3);
        engine.deal_all().unwrap();
        let card = holding(&engine, PlayerId::new(1))[0].id;

        assert_eq!(
            engine.play_card(PlayerId::new(1), card, None, None).unwrap_err(),
            EngineError::NotYourTurn {
                expected: PlayerId::new(0),
                actual: PlayerId::new(1),
            }
        );
    }

    #[test]
    fn test_select_and_cancel() {
        let mut engine = engine(2);
        engine.deal_all().unwrap();
        let card = holding(&engine, PlayerId::new(0))[0].clone();

        let shape = engine.select_card(PlayerId::new(0), card.id).unwrap();
        assert_eq!(shape, engine.effects().get(card.rank).unwrap().shape);
        assert_eq!(engine.pending().unwrap().card, card.id);
        assert_eq!(engine.snapshot().pending.unwrap().card, card.id);

        assert!(engine.cancel_pending().is_some());
        assert_eq!(
            engine.play_pending(None, None).unwrap_err(),
            EngineError::NoPendingPlay
        );
    }

    #[test]
    fn test_reset_round_records_once() {
        let mut engine = engine(2);
        engine.deal_all().unwrap();

        assert!(engine.reset_round());
        assert!(!engine.reset_round());
        assert_eq!(engine.commands().len(), 2);
        assert_eq!(engine.round(), 2);
        assert_eq!(engine.deck_size(), 16);
    }

    #[test]
    fn test_history_and_commands_span_rounds() {
        let mut engine = engine(2);
        engine.deal_all().unwrap();
        let events_before = engine.history().len();

        assert!(engine.reset_round());
        engine.deal_all().unwrap();

        assert_eq!(engine.commands().len(), 3);
        let rounds: Vec<u32> = engine.commands().iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![1, 2, 2]);
        assert!(engine.history().len() > events_before);
        assert!(engine
            .history()
            .iter()
            .any(|e| matches!(e, GameEvent::RoundReset { round: 2 })));
    }

    #[test]
    fn test_execute_dispatches() {
        let mut engine = engine(2);
        let outcome = engine.execute(Command::DealAll).unwrap();
        assert!(matches!(outcome, CommandOutcome::Dealt(cards) if cards.len() == 2));

        let outcome = engine.execute(Command::ResetRound).unwrap();
        assert_eq!(outcome, CommandOutcome::Reset(true));
    }
}
