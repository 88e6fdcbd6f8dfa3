//! Notifications about completed operations.
//!
//! ## Key Types
//!
//! - `GameEvent`: One thing that happened at the table
//! - `Notification`: The events and resulting snapshot of one operation
//! - `Subscriber`: Receives notifications (closures work directly)
//! - `EventBus`: Ordered subscriber list owned by the engine
//!
//! ## Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use hidden_hand::core::{GameConfig, RosterEntry, RosterId};
//! use hidden_hand::engine::GameEngine;
//!
//! let config = GameConfig::builder()
//!     .seat(RosterEntry::new(RosterId::new(1), "Ben"))
//!     .seat(RosterEntry::new(RosterId::new(2), "Josh"))
//!     .build();
//! let mut engine = GameEngine::new(config).unwrap();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! engine.subscribe(move |n: &hidden_hand::events::Notification| {
//!     sink.lock().unwrap().push(n.sequence);
//! });
//!
//! engine.deal_all().unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec![1]);
//! ```

pub mod bus;
pub mod event;

pub use bus::{EventBus, Notification, Subscriber, SubscriptionId};
pub use event::GameEvent;
