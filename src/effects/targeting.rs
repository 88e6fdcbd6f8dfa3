//! Legal targets and guesses for a play.
//!
//! ## Target Rules
//!
//! A rank may target any active, non-safe seat other than the acting
//! seat. The acting seat is added when the rank allows self-targeting or
//! when nobody else can be targeted (the play then fizzles unless the rank
//! allows self-targeting).

use super::table::EffectTable;
use crate::cards::Rank;
use crate::core::PlayerId;
use crate::error::EngineResult;
use crate::players::{PlayerRegistry, SeatList};

/// Seats `acting` may target with `rank`, in seat order.
///
/// ```
/// use hidden_hand::cards::Rank;
/// use hidden_hand::core::{PlayerId, RosterEntry, RosterId};
/// use hidden_hand::effects::{legal_targets, EffectTable};
/// use hidden_hand::players::PlayerRegistry;
///
/// let roster: Vec<_> = (1..=3)
///     .map(|i| RosterEntry::new(RosterId::new(i), format!("P{i}")))
///     .collect();
/// let registry = PlayerRegistry::from_roster(&roster).unwrap();
/// let table = EffectTable::standard();
///
/// let targets = legal_targets(&table, &registry, PlayerId::new(0), Rank::new(1)).unwrap();
/// assert_eq!(targets.as_slice(), &[PlayerId::new(1), PlayerId::new(2)]);
/// ```
pub fn legal_targets(
    table: &EffectTable,
    registry: &PlayerRegistry,
    acting: PlayerId,
    rank: Rank,
) -> EngineResult<SeatList> {
    let descriptor = table.descriptor(rank)?;
    registry.get(acting)?;

    let mut targets = registry.targetable_players(acting);
    if descriptor.may_target_self || targets.is_empty() {
        let at = targets.iter().position(|p| *p > acting).unwrap_or(targets.len());
        targets.insert(at, acting);
    }
    Ok(targets)
}

/// Ranks a guessing effect may name.
#[must_use]
pub fn guessable_ranks(table: &EffectTable) -> Vec<Rank> {
    table.guessable_ranks()
}
