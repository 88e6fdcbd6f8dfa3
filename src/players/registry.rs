//! Seat storage and the elimination/safety flags.
//!
//! `PlayerRegistry` owns every seat's two hands and keeps `is_out` and
//! `is_safe` mutually exclusive: setting one true clears the other.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::{Card, CardId};
use crate::core::{PlayerId, PlayerMap, RosterEntry, RosterId};
use crate::error::{EngineError, EngineResult};
use crate::zones::{Hand, HandRole};

/// Seat list that stays on the stack for ordinary table sizes.
pub type SeatList = SmallVec<[PlayerId; 8]>;

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    /// Seat index (turn order position).
    pub seat: PlayerId,

    /// Identity from the roster.
    pub roster_id: RosterId,

    /// Display name.
    pub name: String,

    holding: Hand,
    discard: Hand,
    is_out: bool,
    is_safe: bool,
}

impl Player {
    fn new(seat: PlayerId, entry: &RosterEntry) -> Self {
        // Both flags set in the roster resolves to out.
        let is_out = entry.is_out;
        let is_safe = entry.is_safe && !entry.is_out;

        Self {
            seat,
            roster_id: entry.id,
            name: entry.name.clone(),
            holding: Hand::new(seat, HandRole::Holding),
            discard: Hand::new(seat, HandRole::Discard),
            is_out,
            is_safe,
        }
    }

    /// The seat's hand in the given role.
    #[must_use]
    pub fn hand(&self, role: HandRole) -> &Hand {
        match role {
            HandRole::Holding => &self.holding,
            HandRole::Discard => &self.discard,
        }
    }

    fn hand_mut(&mut self, role: HandRole) -> &mut Hand {
        match role {
            HandRole::Holding => &mut self.holding,
            HandRole::Discard => &mut self.discard,
        }
    }

    /// Cards currently held.
    #[must_use]
    pub fn holding(&self) -> &Hand {
        &self.holding
    }

    /// Cards played or discarded this round, face up.
    #[must_use]
    pub fn discard(&self) -> &Hand {
        &self.discard
    }

    /// Eliminated from the round.
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.is_out
    }

    /// Immune to targeting.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.is_safe
    }

    /// Still in the round.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.is_out
    }
}

/// All seats, in fixed roster order.
///
/// ## Example
///
/// ```
/// use hidden_hand::core::{PlayerId, RosterEntry, RosterId};
/// use hidden_hand::players::PlayerRegistry;
///
/// let roster = vec![
///     RosterEntry::new(RosterId::new(7), "Ben"),
///     RosterEntry::new(RosterId::new(8), "Josh"),
/// ];
/// let mut registry = PlayerRegistry::from_roster(&roster).unwrap();
///
/// let josh = registry.lookup(RosterId::new(8)).unwrap();
/// assert_eq!(josh, PlayerId::new(1));
///
/// registry.set_safety(josh, true).unwrap();
/// registry.set_out(josh, true).unwrap();
/// assert!(!registry.get(josh).unwrap().is_safe());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: PlayerMap<Player>,
    by_roster: FxHashMap<RosterId, PlayerId>,
}

impl PlayerRegistry {
    /// Seat a roster in declaration order.
    pub fn from_roster(roster: &[RosterEntry]) -> EngineResult<Self> {
        if roster.len() < 2 {
            return Err(EngineError::InvalidRoster("at least two seats are required"));
        }
        if roster.len() > u8::MAX as usize {
            return Err(EngineError::InvalidRoster("at most 255 seats are supported"));
        }

        let mut by_roster = FxHashMap::default();
        let mut players = Vec::with_capacity(roster.len());
        for (seat, entry) in PlayerId::all(roster.len()).zip(roster) {
            if by_roster.insert(entry.id, seat).is_some() {
                return Err(EngineError::DuplicateRosterId(entry.id));
            }
            players.push(Player::new(seat, entry));
        }

        Ok(Self {
            players: PlayerMap::from_vec(players),
            by_roster,
        })
    }

    /// Number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.players.seat_count()
    }

    /// Seat for a roster id.
    pub fn lookup(&self, id: RosterId) -> EngineResult<PlayerId> {
        self.by_roster
            .get(&id)
            .copied()
            .ok_or(EngineError::InvalidRosterId(id))
    }

    /// Get a seat.
    pub fn get(&self, player: PlayerId) -> EngineResult<&Player> {
        self.players
            .get(player)
            .ok_or(EngineError::UnknownPlayer(player))
    }

    fn get_mut(&mut self, player: PlayerId) -> EngineResult<&mut Player> {
        self.players
            .get_mut(player)
            .ok_or(EngineError::UnknownPlayer(player))
    }

    /// A seat's hand in the given role.
    pub fn hand(&self, player: PlayerId, role: HandRole) -> EngineResult<&Hand> {
        Ok(self.get(player)?.hand(role))
    }

    /// Mutable access to a seat's hand.
    pub fn hand_mut(&mut self, player: PlayerId, role: HandRole) -> EngineResult<&mut Hand> {
        Ok(self.get_mut(player)?.hand_mut(role))
    }

    /// Set or clear safety. Setting it clears `is_out`.
    pub fn set_safety(&mut self, player: PlayerId, is_safe: bool) -> EngineResult<()> {
        let seat = self.get_mut(player)?;
        seat.is_safe = is_safe;
        if is_safe {
            seat.is_out = false;
        }
        Ok(())
    }

    /// Set or clear elimination. Setting it clears `is_safe`.
    ///
    /// A newly eliminated seat's holding hand is turned face up onto its
    /// discard pile; those cards are returned in hand order.
    pub fn set_out(&mut self, player: PlayerId, is_out: bool) -> EngineResult<Vec<Card>> {
        let seat = self.get_mut(player)?;
        if !is_out {
            seat.is_out = false;
            return Ok(Vec::new());
        }

        seat.is_safe = false;
        if seat.is_out {
            return Ok(Vec::new());
        }
        seat.is_out = true;

        let mut revealed = seat.holding.drain_all();
        for card in &mut revealed {
            card.flip_up();
            seat.discard.add(card.clone());
        }
        Ok(revealed)
    }

    /// Put a card face up on a seat's discard pile.
    pub fn discard_face_up(&mut self, player: PlayerId, mut card: Card) -> EngineResult<()> {
        card.flip_up();
        self.get_mut(player)?.discard.add(card);
        Ok(())
    }

    /// Exchange two seats' holding hands.
    pub fn swap_holdings(&mut self, a: PlayerId, b: PlayerId) -> EngineResult<()> {
        self.get(b)?;
        if a == b {
            return Ok(());
        }

        let mut moving = std::mem::replace(
            &mut self.get_mut(a)?.holding,
            Hand::new(a, HandRole::Holding),
        );
        self.get_mut(b)?.holding.swap_cards(&mut moving);
        self.get_mut(a)?.holding = moving;
        Ok(())
    }

    /// Seats not out, in seat order.
    #[must_use]
    pub fn active_players(&self) -> SeatList {
        self.players
            .iter()
            .filter(|(_, p)| p.is_active())
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of seats not out.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|(_, p)| p.is_active()).count()
    }

    /// Seats `acting` may target: active, not safe, not `acting`.
    #[must_use]
    pub fn targetable_players(&self, acting: PlayerId) -> SeatList {
        self.players
            .iter()
            .filter(|(id, p)| *id != acting && p.is_active() && !p.is_safe)
            .map(|(id, _)| id)
            .collect()
    }

    /// Clear both flags on every seat.
    pub fn clear_flags(&mut self) {
        for (_, player) in self.players.iter_mut() {
            player.is_out = false;
            player.is_safe = false;
        }
    }

    /// Empty every discard pile in seat order, leaving the cards in `keep`.
    pub fn drain_discards(&mut self, keep: &[CardId]) -> Vec<Card> {
        let mut cards = Vec::new();
        for (_, player) in self.players.iter_mut() {
            cards.extend(player.discard.drain_except(keep));
        }
        cards
    }

    /// Empty every hand of both roles, in seat order.
    pub fn drain_all_hands(&mut self) -> Vec<Card> {
        let mut cards = Vec::new();
        for (_, player) in self.players.iter_mut() {
            cards.extend(player.holding.drain_all());
            cards.extend(player.discard.drain_all());
        }
        cards
    }

    /// Total cards across every hand.
    #[must_use]
    pub fn cards_in_hands(&self) -> usize {
        self.players
            .iter()
            .map(|(_, p)| p.holding.len() + p.discard.len())
            .sum()
    }

    /// Iterate over seats in order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Rank};

    fn roster(n: u64) -> Vec<RosterEntry> {
        (1..=n)
            .map(|i| RosterEntry::new(RosterId::new(i), format!("P{i}")))
            .collect()
    }

    fn card(id: u32, rank: u8) -> Card {
        Card::new(CardId::new(id), Rank::new(rank), "Test")
    }

    #[test]
    fn test_from_roster_seats_in_order() {
        let registry = PlayerRegistry::from_roster(&roster(4)).unwrap();

        assert_eq!(registry.seat_count(), 4);
        assert_eq!(registry.lookup(RosterId::new(3)).unwrap(), PlayerId::new(2));
        assert_eq!(registry.get(PlayerId::new(0)).unwrap().name, "P1");
        assert_eq!(registry.active_players().len(), 4);
    }

    #[test]
    fn test_from_roster_rejects_bad_rosters() {
        assert_eq!(
            PlayerRegistry::from_roster(&roster(1)).unwrap_err().code(),
            "invalid_roster"
        );

        let mut dup = roster(2);
        dup.push(RosterEntry::new(RosterId::new(1), "Again"));
        assert_eq!(
            PlayerRegistry::from_roster(&dup).unwrap_err(),
            EngineError::DuplicateRosterId(RosterId::new(1))
        );
    }

    #[test]
    fn test_roster_with_both_flags_starts_out() {
        let mut entries = roster(2);
        entries[1] = entries[1].clone().out().safe();

        let registry = PlayerRegistry::from_roster(&entries).unwrap();
        let seat = registry.get(PlayerId::new(1)).unwrap();
        assert!(seat.is_out());
        assert!(!seat.is_safe());
    }

    #[test]
    fn test_lookup_and_get_unknown() {
        let registry = PlayerRegistry::from_roster(&roster(2)).unwrap();
        assert_eq!(
            registry.lookup(RosterId::new(99)).unwrap_err(),
            EngineError::InvalidRosterId(RosterId::new(99))
        );
        assert_eq!(
            registry.get(PlayerId::new(5)).unwrap_err(),
            EngineError::UnknownPlayer(PlayerId::new(5))
        );
    }

    #[test]
    fn test_flags_are_mutually_exclusive() {
        let mut registry = PlayerRegistry::from_roster(&roster(3)).unwrap();
        let p = PlayerId::new(1);

        registry.set_safety(p, true).unwrap();
        registry.set_out(p, true).unwrap();
        let seat = registry.get(p).unwrap();
        assert!(seat.is_out() && !seat.is_safe());

        registry.set_safety(p, true).unwrap();
        let seat = registry.get(p).unwrap();
        assert!(!seat.is_out() && seat.is_safe());
    }

    #[test]
    fn test_set_out_reveals_holding() {
        let mut registry = PlayerRegistry::from_roster(&roster(2)).unwrap();
        let p = PlayerId::new(0);
        registry.hand_mut(p, HandRole::Holding).unwrap().add(card(1, 3));

        let revealed = registry.set_out(p, true).unwrap();

        assert_eq!(revealed.len(), 1);
        assert!(revealed[0].is_face_up());
        assert!(registry.hand(p, HandRole::Holding).unwrap().is_empty());
        assert!(registry.hand(p, HandRole::Discard).unwrap().contains(CardId::new(1)));

        // Already out: nothing more moves.
        assert!(registry.set_out(p, true).unwrap().is_empty());
    }

    #[test]
    fn test_targetable_players() {
        let mut registry = PlayerRegistry::from_roster(&roster(4)).unwrap();
        registry.set_out(PlayerId::new(1), true).unwrap();
        registry.set_safety(PlayerId::new(2), true).unwrap();

        let targets = registry.targetable_players(PlayerId::new(0));
        assert_eq!(targets.as_slice(), &[PlayerId::new(3)]);
    }

    #[test]
    fn test_swap_holdings() {
        let mut registry = PlayerRegistry::from_roster(&roster(2)).unwrap();
        let (a, b) = (PlayerId::new(0), PlayerId::new(1));
        registry.hand_mut(a, HandRole::Holding).unwrap().add(card(1, 2));
        registry.hand_mut(b, HandRole::Holding).unwrap().add(card(2, 7));

        registry.swap_holdings(a, b).unwrap();

        let a_hand = registry.hand(a, HandRole::Holding).unwrap();
        assert!(a_hand.contains(CardId::new(2)));
        assert_eq!(a_hand.owner(), a);
        assert!(registry.hand(b, HandRole::Holding).unwrap().contains(CardId::new(1)));
    }

    #[test]
    fn test_swap_with_unknown_seat_changes_nothing() {
        let mut registry = PlayerRegistry::from_roster(&roster(2)).unwrap();
        registry
            .hand_mut(PlayerId::new(0), HandRole::Holding)
            .unwrap()
            .add(card(1, 2));

        assert!(registry.swap_holdings(PlayerId::new(0), PlayerId::new(9)).is_err());
        assert_eq!(registry.hand(PlayerId::new(0), HandRole::Holding).unwrap().len(), 1);
    }

    #[test]
    fn test_drain_and_clear() {
        let mut registry = PlayerRegistry::from_roster(&roster(2)).unwrap();
        registry.hand_mut(PlayerId::new(0), HandRole::Holding).unwrap().add(card(1, 2));
        registry.discard_face_up(PlayerId::new(1), card(2, 4)).unwrap();
        registry.set_out(PlayerId::new(1), true).unwrap();

        assert_eq!(registry.cards_in_hands(), 2);
        assert_eq!(registry.drain_discards(&[]).len(), 1);
        assert_eq!(registry.drain_all_hands().len(), 1);
        assert_eq!(registry.cards_in_hands(), 0);

        registry.clear_flags();
        assert_eq!(registry.active_count(), 2);
    }

    #[test]
    fn test_drain_discards_leaves_kept_cards() {
        let mut registry = PlayerRegistry::from_roster(&roster(2)).unwrap();
        registry.discard_face_up(PlayerId::new(0), card(1, 2)).unwrap();
        registry.discard_face_up(PlayerId::new(1), card(2, 4)).unwrap();

        let drained = registry.drain_discards(&[CardId::new(2)]);
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].id, CardId::new(1));
        assert!(registry
            .hand(PlayerId::new(1), HandRole::Discard)
            .unwrap()
            .contains(CardId::new(2)));
    }
}
