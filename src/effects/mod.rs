//! Card effects: what each rank does when played.
//!
//! ## Key Types
//!
//! - `EffectDescriptor`: Declares a rank's parameter shape and effect kind
//! - `EffectTable`: The rank -> descriptor table
//! - `EffectResolver`: Validates a play, then applies it atomically
//! - `PlayOutcome`: What a resolved play did
//!
//! ## Table-Driven Resolution
//!
//! The resolver never matches on a rank number. Every rank's behavior is
//! read from its descriptor, so a custom table changes the game without
//! touching resolution code.

pub mod descriptor;
pub mod resolver;
pub mod table;
pub mod targeting;

pub use descriptor::{EffectDescriptor, EffectKind, ParamShape};
pub use resolver::{EffectResolver, PlayOutcome, PlayRequest, ValidatedPlay};
pub use table::EffectTable;
pub use targeting::{guessable_ranks, legal_targets};
