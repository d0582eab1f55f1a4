//! Session configuration: the owned aggregate of weights, paytable, paylines
//! and tuning knobs.
//!
//! Callers hold the authoritative copy between spins; the resolver mutates
//! only the weight table (drift correction) and reports its revision so the
//! divergence from the configured distribution stays observable.

use crate::constants::{
    CLASSIC_REEL_COUNT, CLASSIC_VISIBLE_ROWS, DEFAULT_NEAR_MISS_FREQUENCY, DEFAULT_RTP_TARGET,
    DEFAULT_VOLATILITY, DRIFT_CORRECTION_RATE, MIN_MATCH_COUNT, VOLATILITY_MAX, VOLATILITY_MIN,
};
use crate::error::ConfigError;
use crate::payline::Payline;
use crate::paytable::Paytable;
use crate::symbol::{Symbol, BELL, CHERRY, DIAMOND, LEMON, ORANGE, STAR};
use crate::weights::SymbolWeights;
use serde::{Deserialize, Serialize};

fn default_near_miss_frequency() -> f64 {
    DEFAULT_NEAR_MISS_FREQUENCY
}

fn default_drift_rate() -> f64 {
    DRIFT_CORRECTION_RATE
}

fn default_volatility() -> f64 {
    DEFAULT_VOLATILITY
}

fn default_rtp_target() -> f64 {
    DEFAULT_RTP_TARGET
}

/// A complete slot economy plus presentation tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Alphabet size; valid symbols are `0..symbols`.
    pub symbols: u8,
    /// Reels per spin; every payline spans all of them.
    pub reels: u8,
    /// Visible rows per reel.
    pub rows: u8,
    pub weights: SymbolWeights,
    pub paytable: Paytable,
    pub paylines: Vec<Payline>,
    /// Fraction of losing spins eligible for near-miss presentation.
    #[serde(default = "default_near_miss_frequency")]
    pub near_miss_frequency: f64,
    /// Probability that a settled cascade pass applies the weight-drift nudge.
    #[serde(default = "default_drift_rate")]
    pub drift_rate: f64,
    /// Payout volatility multiplier applied to every line win.
    #[serde(default = "default_volatility")]
    pub volatility: f64,
    /// Target return used by rebalancing tooling.
    #[serde(default = "default_rtp_target")]
    pub rtp_target: f64,
}

impl SlotConfig {
    /// The shipped economy: six symbols over five reels and three rows, five
    /// paylines, three payout tiers per symbol topping out at 2000x.
    pub fn classic() -> Self {
        let weights = [
            (CHERRY, 30),
            (LEMON, 25),
            (ORANGE, 20),
            (STAR, 15),
            (BELL, 8),
            (DIAMOND, 2),
        ]
        .into_iter()
        .collect();
        let paytable = [
            (CHERRY, [(3, 5), (4, 20), (5, 100)].into_iter().collect()),
            (LEMON, [(3, 4), (4, 15), (5, 80)].into_iter().collect()),
            (ORANGE, [(3, 3), (4, 10), (5, 50)].into_iter().collect()),
            (STAR, [(3, 10), (4, 50), (5, 300)].into_iter().collect()),
            (BELL, [(3, 15), (4, 100), (5, 500)].into_iter().collect()),
            (DIAMOND, [(3, 50), (4, 300), (5, 2000)].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        let paylines = vec![
            Payline::new(vec![1, 1, 1, 1, 1]),
            Payline::new(vec![0, 0, 0, 0, 0]),
            Payline::new(vec![2, 2, 2, 2, 2]),
            Payline::new(vec![0, 1, 2, 1, 0]),
            Payline::new(vec![2, 1, 0, 1, 2]),
        ];
        Self {
            symbols: 6,
            reels: CLASSIC_REEL_COUNT,
            rows: CLASSIC_VISIBLE_ROWS,
            weights,
            paytable,
            paylines,
            near_miss_frequency: DEFAULT_NEAR_MISS_FREQUENCY,
            drift_rate: DRIFT_CORRECTION_RATE,
            volatility: DEFAULT_VOLATILITY,
            rtp_target: DEFAULT_RTP_TARGET,
        }
    }

    /// All symbols of the alphabet, in order.
    pub fn alphabet(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.symbols).map(Symbol)
    }

    /// Clamp and set the rebalancing target and payout volatility.
    pub fn set_rtp_volatility(&mut self, rtp: f64, volatility: f64) {
        self.rtp_target = rtp.clamp(0.0, 1.0);
        self.volatility = volatility.clamp(VOLATILITY_MIN, VOLATILITY_MAX);
    }

    /// Fail-fast validation of the full configuration.
    ///
    /// Weights must be non-empty, positive and within the alphabet; paylines
    /// must all span the reel count with in-range rows; paytable entries must
    /// reference weighted symbols, use counts in `3..=reels`, and pay a
    /// positive amount.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weights.is_empty() {
            return Err(ConfigError::EmptyWeights);
        }
        for (symbol, weight) in self.weights.iter() {
            if symbol.index() >= self.symbols {
                return Err(ConfigError::SymbolOutOfAlphabet {
                    symbol,
                    alphabet: self.symbols,
                });
            }
            if weight == 0 {
                return Err(ConfigError::ZeroWeight { symbol });
            }
        }
        if self.weights.total() == 0 {
            return Err(ConfigError::ZeroWeightSum);
        }

        if self.paylines.is_empty() {
            return Err(ConfigError::NoPaylines);
        }
        for (index, line) in self.paylines.iter().enumerate() {
            if line.len() != self.reels as usize {
                return Err(ConfigError::PaylineLength {
                    index,
                    len: line.len(),
                    expected: self.reels as usize,
                });
            }
            for &row in line.rows() {
                if row >= self.rows {
                    return Err(ConfigError::RowOutOfRange {
                        index,
                        row,
                        rows: self.rows,
                    });
                }
            }
        }

        for (symbol, tier) in self.paytable.iter() {
            if !self.weights.contains(symbol) {
                return Err(ConfigError::UnweightedSymbol { symbol });
            }
            for (count, payout) in tier.iter() {
                if count < MIN_MATCH_COUNT || count > self.reels {
                    return Err(ConfigError::TierOutOfRange {
                        symbol,
                        count,
                        min: MIN_MATCH_COUNT,
                        max: self.reels,
                    });
                }
                if payout == 0 {
                    return Err(ConfigError::ZeroPayout { symbol, count });
                }
            }
        }

        Ok(())
    }
}
