//! Game configuration types.
//!
//! Callers configure the engine at construction by providing:
//! - `RosterEntry`: One seat per entry, in seat order
//! - `DeckComposition`: How many cards of each rank the deck holds
//! - `SafetyDuration`: How long a granted safety lasts
//! - `GameConfig`: Combines all configuration
//!
//! Nothing about the roster is compiled in; the engine only knows the
//! seats it was given.

use serde::{Deserialize, Serialize};

use super::player::RosterId;
use crate::cards::Rank;
use crate::effects::EffectTable;

/// One roster entry: a seat's identity and its initial flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Stable identity.
    pub id: RosterId,

    /// Display name.
    pub name: String,

    /// Starts the session eliminated.
    #[serde(default)]
    pub is_out: bool,

    /// Starts the session immune to targeting.
    #[serde(default)]
    pub is_safe: bool,
}

impl RosterEntry {
    /// Create an entry with both flags clear.
    pub fn new(id: RosterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_out: false,
            is_safe: false,
        }
    }

    /// Start this seat eliminated.
    #[must_use]
    pub fn out(mut self) -> Self {
        self.is_out = true;
        self
    }

    /// Start this seat safe.
    #[must_use]
    pub fn safe(mut self) -> Self {
        self.is_safe = true;
        self
    }
}

/// Number of copies of one rank in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    /// Rank of the copies.
    pub rank: Rank,
    /// How many copies.
    pub copies: u8,
}

/// The cards a session's deck is built from.
///
/// Cards are created in entry order and given ids starting at 1.
///
/// ```
/// use hidden_hand::cards::Rank;
/// use hidden_hand::core::DeckComposition;
///
/// let deck = DeckComposition::new([(Rank::new(1), 3), (Rank::new(2), 1)]);
/// assert_eq!(deck.total(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckComposition {
    /// Entries in creation order.
    pub entries: Vec<DeckEntry>,
}

impl DeckComposition {
    /// Create a composition from `(rank, copies)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (Rank, u8)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(rank, copies)| DeckEntry { rank, copies })
                .collect(),
        }
    }

    /// Total number of cards.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.copies as usize).sum()
    }

    /// Ranks in card-creation order, one item per card.
    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.entries
            .iter()
            .flat_map(|e| std::iter::repeat(e.rank).take(e.copies as usize))
    }
}

/// How long a granted safety lasts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyDuration {
    /// Until the round is reset.
    #[default]
    Round,
    /// Until the safe seat's next turn begins.
    UntilOwnTurn,
}

/// Complete engine configuration.
///
/// ## Example
///
/// ```
/// use hidden_hand::core::{GameConfig, RosterEntry, RosterId};
///
/// let config = GameConfig::builder()
///     .seat(RosterEntry::new(RosterId::new(1), "Ben"))
///     .seat(RosterEntry::new(RosterId::new(2), "Josh"))
///     .local_player(RosterId::new(1))
///     .seed(7)
///     .build();
///
/// assert_eq!(config.roster.len(), 2);
/// assert_eq!(config.deck_composition().total(), 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats in turn order.
    pub roster: Vec<RosterEntry>,

    /// The seat this engine instance presents as "me".
    pub local_player: RosterId,

    /// Rank -> effect table.
    #[serde(default)]
    pub effects: EffectTable,

    /// Deck contents. `None` uses the table's default copies.
    #[serde(default)]
    pub deck: Option<DeckComposition>,

    /// How long safety lasts.
    #[serde(default)]
    pub safety: SafetyDuration,

    /// Seed for shuffling and random deals.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    42
}

impl GameConfig {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::default()
    }

    /// The deck composition actually used.
    #[must_use]
    pub fn deck_composition(&self) -> DeckComposition {
        self.deck
            .clone()
            .unwrap_or_else(|| self.effects.default_composition())
    }
}

/// Builder for `GameConfig`.
///
/// The local player defaults to the first seat added.
#[derive(Clone, Debug, Default)]
pub struct GameConfigBuilder {
    roster: Vec<RosterEntry>,
    local_player: Option<RosterId>,
    effects: Option<EffectTable>,
    deck: Option<DeckComposition>,
    safety: SafetyDuration,
    seed: Option<u64>,
}

impl GameConfigBuilder {
    /// Add a seat.
    #[must_use]
    pub fn seat(mut self, entry: RosterEntry) -> Self {
        self.roster.push(entry);
        self
    }

    /// Add several seats in order.
    #[must_use]
    pub fn seats(mut self, entries: impl IntoIterator<Item = RosterEntry>) -> Self {
        self.roster.extend(entries);
        self
    }

    /// Set the local player.
    #[must_use]
    pub fn local_player(mut self, id: RosterId) -> Self {
        self.local_player = Some(id);
        self
    }

    /// Use a custom effect table.
    #[must_use]
    pub fn effects(mut self, table: EffectTable) -> Self {
        self.effects = Some(table);
        self
    }

    /// Use a custom deck composition.
    #[must_use]
    pub fn deck(mut self, deck: DeckComposition) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Set the safety duration.
    #[must_use]
    pub fn safety(mut self, safety: SafetyDuration) -> Self {
        self.safety = safety;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configuration. Validation happens at engine construction.
    #[must_use]
    pub fn build(self) -> GameConfig {
        let local_player = self
            .local_player
            .or_else(|| self.roster.first().map(|e| e.id))
            .unwrap_or(RosterId::new(0));

        GameConfig {
            roster: self.roster,
            local_player,
            effects: self.effects.unwrap_or_default(),
            deck: self.deck,
            safety: self.safety,
            seed: self.seed.unwrap_or_else(default_seed),
        }
    }
}
