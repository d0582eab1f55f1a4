//! Deterministic engine for the reelworks slot economy.
//!
//! Two responsibilities live here:
//! - paytable economics: weight normalization, theoretical return and
//!   target-return rebalancing ([`rtp`]);
//! - spin resolution: payline evaluation ([`payline`]), the cascade loop
//!   with its weight-drift correction ([`cascade`]), and near-miss
//!   presentation for losing outcomes ([`near_miss`]).
//!
//! ## Determinism requirements
//! All randomness flows through [`SpinRng`], keyed by `(session seed, spin
//! index)`, so any resolution replays exactly from its coordinates. Do not
//! introduce wall-clock time or ambient randomness anywhere on the spin
//! path.

pub mod cascade;
pub mod near_miss;
pub mod payline;
pub mod rng;
pub mod rtp;

pub use cascade::{resolve_spin, Session, SpinStep};
pub use payline::{evaluate_line, settle_pass, LineWin};
pub use rng::SpinRng;
pub use rtp::{normalize, rebalance_paytable, theoretical_rtp};
