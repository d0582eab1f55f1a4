//! Error taxonomy shared across the workspace.

use crate::outcome::SpinState;
use crate::symbol::Symbol;
use thiserror::Error;

/// Configuration faults detected fail-fast at load. Never recovered
/// automatically.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("symbol weights are empty")]
    EmptyWeights,
    #[error("symbol weights sum to zero")]
    ZeroWeightSum,
    #[error("weight entry for {symbol} is zero")]
    ZeroWeight { symbol: Symbol },
    #[error("weight entry for {symbol} is outside the {alphabet}-symbol alphabet")]
    SymbolOutOfAlphabet { symbol: Symbol, alphabet: u8 },
    #[error("no paylines configured")]
    NoPaylines,
    #[error("payline {index} has length {len}, expected {expected}")]
    PaylineLength {
        index: usize,
        len: usize,
        expected: usize,
    },
    #[error("payline {index} references row {row}, visible rows are {rows}")]
    RowOutOfRange { index: usize, row: u8, rows: u8 },
    #[error("paytable references {symbol} which has no weight entry")]
    UnweightedSymbol { symbol: Symbol },
    #[error("paytable tier for {symbol} has count {count}, valid range is {min}..={max}")]
    TierOutOfRange {
        symbol: Symbol,
        count: u8,
        min: u8,
        max: u8,
    },
    #[error("paytable tier for {symbol} at count {count} has zero payout")]
    ZeroPayout { symbol: Symbol, count: u8 },
}

/// Faults surfaced by the spin path.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SpinError {
    /// A spin was requested while a resolution cycle is active. Requests are
    /// rejected, never queued.
    #[error("spin rejected while {state:?}")]
    SpinInProgress { state: SpinState },
    /// Stake exceeds the available balance; nothing was mutated.
    #[error("insufficient funds: bet {needed} exceeds balance {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    /// The cascade loop hit its pass cap. `settled` credits were committed
    /// before the abort; the pass that tripped the cap is discarded.
    #[error("cascade aborted after {passes} passes with {settled} settled")]
    CascadeOverrun { settled: u64, passes: u32 },
}
