/// Reel count of the classic five-reel layout.
pub const CLASSIC_REEL_COUNT: u8 = 5;

/// Visible rows per reel in the classic layout.
pub const CLASSIC_VISIBLE_ROWS: u8 = 3;

/// Smallest run length that can pay.
pub const MIN_MATCH_COUNT: u8 = 3;

/// Hard bound on cascade passes within one spin. Exceeding it is an internal
/// invariant violation, never a payout path.
pub const MAX_CASCADE_PASSES: u32 = 64;

/// Fraction of losing spins eligible for near-miss presentation.
pub const DEFAULT_NEAR_MISS_FREQUENCY: f64 = 0.25;

/// Reels overwritten with the matching symbol by a near-miss.
pub const NEAR_MISS_MATCHED_REELS: u8 = 2;

/// Symbols excluded from the near-miss pool, counted from the top of the
/// payout ranking.
pub const NEAR_MISS_EXCLUDED_TOP: usize = 2;

/// Probability that a settled cascade pass nudges the weight table.
pub const DRIFT_CORRECTION_RATE: f64 = 0.05;

/// Default payout volatility multiplier (inert).
pub const DEFAULT_VOLATILITY: f64 = 1.0;

/// Lowest volatility accepted by configuration.
pub const VOLATILITY_MIN: f64 = 0.5;

/// Highest volatility accepted by configuration.
pub const VOLATILITY_MAX: f64 = 2.0;

/// Ceiling applied to the volatility multiplier on the payout path.
pub const VOLATILITY_PAYOUT_CAP: f64 = 3.0;

/// Default target return used by paytable rebalancing tooling.
pub const DEFAULT_RTP_TARGET: f64 = 0.95;

/// Starting credits for a new session.
pub const STARTING_CREDITS: u64 = 100;

/// Default stake per spin.
pub const DEFAULT_BET: u64 = 5;
