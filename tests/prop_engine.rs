//! Property-based tests for engine invariants.
//!
//! Random operation sequences (legal and illegal) are driven against the
//! engine and the table invariants are checked after every step.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use hidden_hand::cards::{CardId, Rank};
use hidden_hand::core::{GameConfig, PlayerId, RosterEntry, RosterId};
use hidden_hand::engine::GameEngine;
use hidden_hand::players::PlayerRegistry;
use hidden_hand::turns::{TurnAdvance, TurnCoordinator};

#[derive(Clone, Debug)]
enum Op {
    DealOne(Option<u8>),
    DealAll,
    /// Arbitrary play, usually rejected.
    Play {
        seat: Option<u8>,
        card: usize,
        target: Option<u8>,
        guess: Option<u8>,
    },
    /// A legal play by the current seat.
    Turn,
    Reset,
}

fn op_strategy(seats: u8) -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => proptest::option::of(0..seats).prop_map(Op::DealOne),
        1 => Just(Op::DealAll),
        4 => (
            proptest::option::weighted(0.2, 0..seats + 1),
            0usize..4,
            proptest::option::of(0..seats + 1),
            proptest::option::of(0u8..10),
        )
            .prop_map(|(seat, card, target, guess)| Op::Play { seat, card, target, guess }),
        6 => Just(Op::Turn),
        1 => Just(Op::Reset),
    ]
}

fn engine(seats: u8, seed: u64) -> GameEngine {
    let config = GameConfig::builder()
        .seats((0..seats).map(|i| RosterEntry::new(RosterId::new(u64::from(i)), format!("P{i}"))))
        .seed(seed)
        .build();
    GameEngine::new(config).unwrap()
}

fn check_invariants(engine: &GameEngine) -> Result<(), TestCaseError> {
    let snapshot = engine.snapshot();

    // Card conservation, by count and by identity.
    prop_assert_eq!(snapshot.card_count(), engine.total_cards());
    let mut ids: Vec<CardId> = engine.state().deck.iter().map(|c| c.id).collect();
    for player in snapshot.players.iter() {
        ids.extend(player.holding.iter().map(|c| c.id));
        ids.extend(player.discard.iter().map(|c| c.id));
    }
    ids.sort_unstable();
    ids.dedup();
    prop_assert_eq!(ids.len(), engine.total_cards());

    for player in snapshot.players.iter() {
        prop_assert!(!(player.is_out && player.is_safe));
        prop_assert!(player.discard.iter().all(|c| c.is_face_up()));
        prop_assert!(player.holding.iter().all(|c| !c.is_face_up()));
    }

    let active = snapshot.active_players();
    prop_assert_eq!(snapshot.winner.is_some(), active.len() == 1);
    if snapshot.winner.is_none() {
        prop_assert!(active.contains(&snapshot.current_turn));
    }
    Ok(())
}

fn legal_turn(engine: &mut GameEngine) -> Result<(), TestCaseError> {
    if engine.winner().is_some() {
        return Ok(());
    }
    let seat = engine.current_turn();
    if engine.player(seat).unwrap().holding().is_empty() && engine.deal_one(Some(seat)).is_err() {
        return Ok(());
    }

    let holding = engine.player(seat).unwrap().holding();
    let card = match engine.forced_card(seat).unwrap() {
        Some(id) => holding.get(id).cloned().unwrap(),
        None => holding.iter().next().cloned().unwrap(),
    };
    let shape = engine.effects().get(card.rank).unwrap().shape;
    let target = shape
        .needs_target()
        .then(|| engine.legal_targets_for(seat, card.rank).unwrap()[0]);
    let guess = shape.needs_guess().then(|| engine.guessable_ranks()[0]);

    let result = engine.play_card(seat, card.id, target, guess);
    prop_assert!(result.is_ok(), "legal play rejected: {:?}", result);
    Ok(())
}

fn apply(engine: &mut GameEngine, op: &Op) -> Result<(), TestCaseError> {
    let before = engine.snapshot();
    let history = engine.history().len();

    let failed = match op {
        Op::DealOne(to) => engine.deal_one(to.map(PlayerId::new)).is_err(),
        Op::DealAll => engine.deal_all().is_err(),
        Op::Play {
            seat,
            card,
            target,
            guess,
        } => {
            let acting = seat.map_or(engine.current_turn(), PlayerId::new);
            let card = engine
                .player(acting)
                .ok()
                .and_then(|p| {
                    let cards: Vec<CardId> = p.holding().iter().map(|c| c.id).collect();
                    cards.get(card % cards.len().max(1)).copied()
                })
                .unwrap_or(CardId::new(9999));
            engine
                .play_card(acting, card, target.map(PlayerId::new), guess.map(Rank::new))
                .is_err()
        }
        Op::Turn => {
            legal_turn(engine)?;
            false
        }
        Op::Reset => {
            engine.reset_round();
            let after = engine.snapshot();
            prop_assert!(!engine.reset_round());
            prop_assert_eq!(engine.snapshot(), after);
            false
        }
    };

    if failed {
        prop_assert_eq!(engine.snapshot(), before);
        prop_assert_eq!(engine.history().len(), history);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Conservation, flag exclusion and atomicity hold for any sequence.
    #[test]
    fn prop_invariants_hold_for_any_sequence(
        (seats, seed, ops) in (2u8..=6).prop_flat_map(|seats| {
            (Just(seats), any::<u64>(), proptest::collection::vec(op_strategy(seats), 1..80))
        })
    ) {
        let mut engine = engine(seats, seed);
        check_invariants(&engine)?;

        for op in &ops {
            apply(&mut engine, op)?;
            check_invariants(&engine)?;
        }
    }

    /// Advancing never lands on an eliminated seat, and the round ends
    /// exactly when one active seat remains.
    #[test]
    fn prop_turn_advance_skips_out_seats(
        out in proptest::collection::vec(any::<bool>(), 2..9),
        steps in 1usize..20,
    ) {
        let roster: Vec<RosterEntry> = (0..out.len() as u64)
            .map(|i| RosterEntry::new(RosterId::new(i), format!("P{i}")))
            .collect();
        let mut registry = PlayerRegistry::from_roster(&roster).unwrap();
        let mut turns = TurnCoordinator::new(&registry);
        for (i, is_out) in out.iter().enumerate() {
            if *is_out {
                registry.set_out(PlayerId::new(i as u8), true).unwrap();
            }
        }
        let active = registry.active_count();
        prop_assume!(active >= 1);

        for _ in 0..steps {
            match turns.advance(&registry) {
                TurnAdvance::Next(seat) => {
                    prop_assert!(active > 1);
                    prop_assert!(registry.get(seat).unwrap().is_active());
                }
                TurnAdvance::RoundOver { winner } => {
                    prop_assert_eq!(active, 1);
                    prop_assert!(registry.get(winner).unwrap().is_active());
                }
            }
        }
    }

    /// Two consecutive resets leave identical state.
    #[test]
    fn prop_reset_is_idempotent(seed in any::<u64>(), deals in 0usize..10) {
        let mut engine = engine(4, seed);
        for i in 0..deals {
            let _ = engine.deal_one(Some(PlayerId::new((i % 4) as u8)));
        }

        engine.reset_round();
        let first = engine.snapshot();
        engine.reset_round();
        prop_assert_eq!(engine.snapshot(), first);
        prop_assert_eq!(engine.deck_size(), engine.total_cards());
    }
}
