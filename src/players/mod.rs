//! The seats at the table.
//!
//! ## Key Types
//!
//! - `Player`: One seat with its holding and discard hands and its flags
//! - `PlayerRegistry`: Every seat in fixed roster order, plus lookup by `RosterId`

pub mod registry;

pub use registry::{Player, PlayerRegistry, SeatList};
