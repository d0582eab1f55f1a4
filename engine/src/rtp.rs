//! Paytable economics: weight normalization, theoretical return, and
//! target-return rebalancing.
//!
//! The return model treats every visible reel position as an independent
//! draw from the weighted symbol distribution. Physical reel-strip layout
//! and the near-miss presentation applied elsewhere do not enter the model;
//! that is a deliberate modeling assumption, kept so the figure stays cheap
//! to recompute against live (drifted) weights.

use reelworks_types::{
    ConfigError, Paytable, Payline, PayoutTier, Symbol, SymbolWeights, MIN_MATCH_COUNT,
};
use std::collections::BTreeMap;

/// Normalize raw weights into a probability distribution.
///
/// Output probabilities sum to 1 within floating-point tolerance and
/// preserve the relative ratios of the input weights. Pure and
/// deterministic.
pub fn normalize(weights: &SymbolWeights) -> Result<BTreeMap<Symbol, f64>, ConfigError> {
    if weights.is_empty() {
        return Err(ConfigError::EmptyWeights);
    }
    let total = weights.total();
    if total == 0 {
        return Err(ConfigError::ZeroWeightSum);
    }
    let total = total as f64;
    Ok(weights
        .iter()
        .map(|(symbol, weight)| (symbol, weight as f64 / total))
        .collect())
}

/// One `(symbol, count)` payout cell with its exact-run probability.
struct TierCell {
    symbol: Symbol,
    count: u8,
    base: u64,
    prob: f64,
}

/// Probability of an exact run of `count` matches starting at reel 0:
/// `p^count` for a full-width run, `p^count * (1 - p)` when a break symbol
/// must follow.
fn exact_run_probability(p: f64, count: u8, reels: u8) -> f64 {
    let run = p.powi(count as i32);
    if count < reels {
        run * (1.0 - p)
    } else {
        run
    }
}

/// Enumerate every paying `(symbol, count)` cell for symbols with positive
/// probability.
fn tier_cells(paytable: &Paytable, probs: &BTreeMap<Symbol, f64>, reels: u8) -> Vec<TierCell> {
    let mut cells = Vec::new();
    for (symbol, tier) in paytable.iter() {
        let p = probs.get(&symbol).copied().unwrap_or(0.0);
        if p <= 0.0 {
            continue;
        }
        for count in MIN_MATCH_COUNT..=reels {
            let Some(base) = tier.get(count) else {
                continue;
            };
            cells.push(TierCell {
                symbol,
                count,
                base,
                prob: exact_run_probability(p, count, reels),
            });
        }
    }
    cells
}

/// Theoretical expected return per unit bet per spin, staking one unit per
/// line and treating lines as independent.
pub fn theoretical_rtp(
    paytable: &Paytable,
    weights: &SymbolWeights,
    paylines: &[Payline],
) -> Result<f64, ConfigError> {
    let Some(first) = paylines.first() else {
        return Err(ConfigError::NoPaylines);
    };
    let probs = normalize(weights)?;
    let reels = first.len() as u8;
    let ev_per_line: f64 = tier_cells(paytable, &probs, reels)
        .iter()
        .map(|cell| cell.prob * cell.base as f64)
        .sum();
    Ok(ev_per_line * paylines.len() as f64)
}

/// Rebalance payouts to hit `target_rtp` while biasing the prize shape by
/// `preserve_factor`.
///
/// A positive factor pulls relative mass toward already-large payouts (more
/// volatile), zero keeps proportions, negative compresses toward uniform.
/// Final payouts round to integers and floor at 1 so no tier is erased.
/// Returns a fresh paytable and never mutates the input; when the current
/// return is not positive there is nothing to scale and an unchanged copy
/// comes back.
pub fn rebalance_paytable(
    paytable: &Paytable,
    weights: &SymbolWeights,
    paylines: &[Payline],
    target_rtp: f64,
    preserve_factor: f64,
) -> Result<Paytable, ConfigError> {
    let current = theoretical_rtp(paytable, weights, paylines)?;
    if current <= 0.0 {
        return Ok(paytable.clone());
    }

    let probs = normalize(weights)?;
    let reels = paylines[0].len() as u8;
    let cells = tier_cells(paytable, &probs, reels);

    let target_ev_per_line = target_rtp / paylines.len() as f64;

    // Probability-weighted mean of the existing payouts, the baseline the
    // preserve exponent measures against.
    let prob_mass: f64 = cells.iter().map(|cell| cell.prob).sum();
    let avg_base: f64 =
        cells.iter().map(|cell| cell.base as f64 * cell.prob).sum::<f64>() / prob_mass.max(1e-12);

    let adjusted: Vec<f64> = cells
        .iter()
        .map(|cell| {
            let rel = cell.base as f64 / avg_base.max(1.0);
            cell.base as f64 * rel.powf(preserve_factor)
        })
        .collect();

    // Single scalar K so that sum(prob * adjusted * K) hits the per-line
    // target; a degenerate denominator falls back to leaving scale alone.
    let denom: f64 = cells
        .iter()
        .zip(&adjusted)
        .map(|(cell, weight)| cell.prob * weight)
        .sum();
    let k = if denom > 0.0 {
        target_ev_per_line / denom
    } else {
        1.0
    };

    // Every input symbol keeps an entry, even when zero probability left it
    // without cells.
    let mut rebalanced = Paytable::new();
    for symbol in paytable.symbols() {
        rebalanced.insert(symbol, PayoutTier::new());
    }
    for (cell, weight) in cells.iter().zip(&adjusted) {
        let value = (weight * k).round().max(1.0) as u64;
        rebalanced.tier_mut(cell.symbol).insert(cell.count, value);
    }
    Ok(rebalanced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelworks_types::{SlotConfig, BELL, CHERRY, DIAMOND, LEMON};

    fn single_line(reels: usize) -> Vec<Payline> {
        vec![Payline::new(vec![0; reels])]
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let config = SlotConfig::classic();
        let probs = normalize(&config.weights).unwrap();
        let sum: f64 = probs.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((probs[&CHERRY] - 0.30).abs() < 1e-12);
        assert!((probs[&DIAMOND] - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_preserves_ratios() {
        let weights = [(CHERRY, 12), (LEMON, 3)].into_iter().collect();
        let probs = normalize(&weights).unwrap();
        assert!((probs[&CHERRY] / probs[&LEMON] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_rejects_empty_weights() {
        assert_eq!(
            normalize(&SymbolWeights::new()),
            Err(ConfigError::EmptyWeights)
        );
    }

    #[test]
    fn test_normalize_rejects_zero_sum() {
        let weights = [(CHERRY, 0), (LEMON, 0)].into_iter().collect();
        assert_eq!(normalize(&weights), Err(ConfigError::ZeroWeightSum));
    }

    #[test]
    fn test_theoretical_rtp_two_symbol_example() {
        // p = 0.5 for the paying symbol over five reels and one line:
        // EV = 0.5^3*0.5*5 + 0.5^4*0.5*20 + 0.5^5*100 = 4.0625
        let weights = [(CHERRY, 10), (LEMON, 10)].into_iter().collect();
        let paytable: Paytable =
            [(CHERRY, [(3, 5), (4, 20), (5, 100)].into_iter().collect())]
                .into_iter()
                .collect();
        let rtp = theoretical_rtp(&paytable, &weights, &single_line(5)).unwrap();
        assert!((rtp - 4.0625).abs() < 1e-9);
    }

    #[test]
    fn test_theoretical_rtp_scales_with_line_count() {
        let weights = [(CHERRY, 10), (LEMON, 10)].into_iter().collect();
        let paytable: Paytable =
            [(CHERRY, [(3, 5), (4, 20), (5, 100)].into_iter().collect())]
                .into_iter()
                .collect();
        let one = theoretical_rtp(&paytable, &weights, &single_line(5)).unwrap();
        let three = theoretical_rtp(
            &paytable,
            &weights,
            &[
                Payline::new(vec![0; 5]),
                Payline::new(vec![0; 5]),
                Payline::new(vec![0; 5]),
            ],
        )
        .unwrap();
        assert!((three - 3.0 * one).abs() < 1e-9);
    }

    #[test]
    fn test_theoretical_rtp_invariant_under_weight_scaling() {
        let config = SlotConfig::classic();
        let scaled: SymbolWeights = config
            .weights
            .iter()
            .map(|(symbol, weight)| (symbol, weight * 7))
            .collect();
        let base = theoretical_rtp(&config.paytable, &config.weights, &config.paylines).unwrap();
        let bumped = theoretical_rtp(&config.paytable, &scaled, &config.paylines).unwrap();
        assert!((base - bumped).abs() < 1e-9);
    }

    #[test]
    fn test_theoretical_rtp_ignores_unweighted_symbols() {
        let weights = [(CHERRY, 10)].into_iter().collect();
        let paytable: Paytable = [
            (CHERRY, [(3, 5)].into_iter().collect()),
            (BELL, [(3, 1000)].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        let rtp = theoretical_rtp(&paytable, &weights, &single_line(3)).unwrap();
        // Only the cherry cell contributes; p = 1 gives a certain full run.
        assert!((rtp - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_theoretical_rtp_requires_paylines() {
        let config = SlotConfig::classic();
        assert_eq!(
            theoretical_rtp(&config.paytable, &config.weights, &[]),
            Err(ConfigError::NoPaylines)
        );
    }

    #[test]
    fn test_rebalance_hits_target_on_classic_economy() {
        let config = SlotConfig::classic();
        let rebalanced = rebalance_paytable(
            &config.paytable,
            &config.weights,
            &config.paylines,
            0.95,
            0.0,
        )
        .unwrap();
        let achieved =
            theoretical_rtp(&rebalanced, &config.weights, &config.paylines).unwrap();
        assert!(
            (achieved - 0.95).abs() < 0.02,
            "achieved {achieved}, wanted ~0.95"
        );
    }

    #[test]
    fn test_rebalance_target_zero_floors_every_payout() {
        let config = SlotConfig::classic();
        let rebalanced = rebalance_paytable(
            &config.paytable,
            &config.weights,
            &config.paylines,
            0.0,
            0.0,
        )
        .unwrap();
        for (_, tier) in rebalanced.iter() {
            for (_, payout) in tier.iter() {
                assert_eq!(payout, 1);
            }
        }
    }

    #[test]
    fn test_rebalance_is_deterministic() {
        let config = SlotConfig::classic();
        let a = rebalance_paytable(
            &config.paytable,
            &config.weights,
            &config.paylines,
            0.9,
            0.5,
        )
        .unwrap();
        let b = rebalance_paytable(
            &config.paytable,
            &config.weights,
            &config.paylines,
            0.9,
            0.5,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rebalance_never_mutates_the_input() {
        let config = SlotConfig::classic();
        let before = config.paytable.clone();
        let _ = rebalance_paytable(
            &config.paytable,
            &config.weights,
            &config.paylines,
            0.5,
            1.0,
        )
        .unwrap();
        assert_eq!(config.paytable, before);
    }

    #[test]
    fn test_rebalance_keeps_symbol_keys() {
        let config = SlotConfig::classic();
        let rebalanced = rebalance_paytable(
            &config.paytable,
            &config.weights,
            &config.paylines,
            0.95,
            0.0,
        )
        .unwrap();
        let before: Vec<Symbol> = config.paytable.symbols().collect();
        let after: Vec<Symbol> = rebalanced.symbols().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_rebalance_returns_copy_when_current_rtp_is_zero() {
        // Every paytable symbol lacks a weight entry, so the current return
        // is zero and there is nothing to scale.
        let weights = [(CHERRY, 10)].into_iter().collect();
        let paytable: Paytable = [(BELL, [(3, 1000)].into_iter().collect())]
            .into_iter()
            .collect();
        let rebalanced =
            rebalance_paytable(&paytable, &weights, &single_line(3), 0.95, 0.0).unwrap();
        assert_eq!(rebalanced, paytable);
    }

    #[test]
    fn test_positive_preserve_factor_favors_large_prizes() {
        let config = SlotConfig::classic();
        let flat = rebalance_paytable(
            &config.paytable,
            &config.weights,
            &config.paylines,
            0.95,
            0.0,
        )
        .unwrap();
        let volatile = rebalance_paytable(
            &config.paytable,
            &config.weights,
            &config.paylines,
            0.95,
            1.0,
        )
        .unwrap();
        // The jackpot grows relative to the flat rebalance; the common small
        // prize shrinks (down to its floor).
        let flat_top = flat.get(DIAMOND).unwrap().get(5).unwrap();
        let volatile_top = volatile.get(DIAMOND).unwrap().get(5).unwrap();
        assert!(volatile_top > flat_top);
        let flat_small = flat.get(CHERRY).unwrap().get(3).unwrap();
        let volatile_small = volatile.get(CHERRY).unwrap().get(3).unwrap();
        assert!(volatile_small <= flat_small);
    }
}
