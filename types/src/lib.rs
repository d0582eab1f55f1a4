//! Core data model for the reelworks payout engine.
//!
//! Defines the symbol/weight/paytable/payline/grid value objects, the win
//! artifacts produced by cascade resolution, session configuration with
//! fail-fast validation, and the error taxonomy shared across the workspace.
//!
//! ## Determinism requirements
//! - Collections are ordered (`BTreeMap`); iteration order must never depend
//!   on hashing.
//! - No wall-clock time and no ambient randomness; every draw is made by the
//!   engine through its seeded RNG.

mod config;
mod constants;
mod error;
mod grid;
mod outcome;
mod payline;
mod paytable;
mod symbol;
mod weights;

pub use config::SlotConfig;
pub use constants::*;
pub use error::{ConfigError, SpinError};
pub use grid::Grid;
pub use outcome::{CascadePass, CascadeResult, NearMiss, SpinState, WinEvent};
pub use payline::Payline;
pub use paytable::{Paytable, PayoutTier};
pub use symbol::{Symbol, BELL, CHERRY, DIAMOND, LEMON, ORANGE, STAR};
pub use weights::SymbolWeights;
