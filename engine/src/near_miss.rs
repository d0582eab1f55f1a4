//! Near-miss presentation for losing spins.
//!
//! A cosmetic grid mutation: after a resolution settles at zero, one payline
//! is rewritten to show "two matched, third different". The mutated grid is
//! never re-evaluated; no payout can result.

use crate::rng::SpinRng;
use reelworks_types::{
    Grid, NearMiss, Payline, Paytable, Symbol, NEAR_MISS_EXCLUDED_TOP, NEAR_MISS_MATCHED_REELS,
};

/// Symbols eligible to star in a near-miss: the alphabet minus the highest
/// payers, so the pattern never implies a missed jackpot. The exclusion
/// shrinks on tiny alphabets so at least one candidate remains; symbols
/// absent from the paytable are never excluded.
fn candidate_pool(paytable: &Paytable, alphabet: u8) -> Vec<Symbol> {
    let cut = NEAR_MISS_EXCLUDED_TOP.min(alphabet.saturating_sub(1) as usize);
    let excluded: Vec<Symbol> = paytable.ranked_by_payout().into_iter().take(cut).collect();
    (0..alphabet)
        .map(Symbol)
        .filter(|symbol| !excluded.contains(symbol))
        .collect()
}

/// Maybe rewrite one payline of a losing grid into the near-miss pattern.
///
/// Fires with probability `frequency`. The chosen line's first
/// [`NEAR_MISS_MATCHED_REELS`] reels are overwritten with a candidate symbol
/// and the remaining reels with the next symbol in alphabet order. Must only
/// be called after win evaluation has finalized at zero.
pub fn inject(
    grid: &mut Grid,
    paylines: &[Payline],
    paytable: &Paytable,
    alphabet: u8,
    frequency: f64,
    rng: &mut SpinRng,
) -> Option<NearMiss> {
    if paylines.is_empty() || alphabet == 0 {
        return None;
    }
    if !rng.chance(frequency) {
        return None;
    }
    let candidates = candidate_pool(paytable, alphabet);
    if candidates.is_empty() {
        return None;
    }

    let line_index = rng.pick(paylines.len());
    let line = &paylines[line_index];
    let symbol = candidates[rng.pick(candidates.len())];
    let breaker = symbol.successor(alphabet);
    for reel in 0..grid.reels() {
        let row = line.row(reel as usize);
        if reel < NEAR_MISS_MATCHED_REELS {
            grid.set_cell(reel, row, symbol);
        } else {
            grid.set_cell(reel, row, breaker);
        }
    }
    tracing::debug!(line = line_index, symbol = %symbol, "near miss injected");
    Some(NearMiss { line_index, symbol })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payline::settle_pass;
    use reelworks_types::{SlotConfig, BELL, CHERRY, DIAMOND, LEMON, ORANGE, STAR};

    fn losing_grid() -> Grid {
        // No three-in-a-row anywhere: alternate columns.
        Grid::from_columns(&[
            vec![CHERRY, LEMON, ORANGE],
            vec![LEMON, ORANGE, CHERRY],
            vec![CHERRY, LEMON, ORANGE],
            vec![LEMON, ORANGE, CHERRY],
            vec![CHERRY, LEMON, ORANGE],
        ])
        .unwrap()
    }

    #[test]
    fn test_pool_excludes_the_top_payers() {
        let config = SlotConfig::classic();
        let pool = candidate_pool(&config.paytable, config.symbols);
        assert_eq!(pool, vec![CHERRY, LEMON, ORANGE, STAR]);
        assert!(!pool.contains(&DIAMOND));
        assert!(!pool.contains(&BELL));
    }

    #[test]
    fn test_pool_keeps_a_candidate_on_tiny_alphabets() {
        let paytable: Paytable = [
            (CHERRY, [(3, 5)].into_iter().collect()),
            (LEMON, [(3, 50)].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        // Only the single top payer is excluded from a two-symbol alphabet.
        assert_eq!(candidate_pool(&paytable, 2), vec![CHERRY]);
        assert_eq!(candidate_pool(&paytable, 1), vec![CHERRY]);
    }

    #[test]
    fn test_zero_frequency_never_fires() {
        let config = SlotConfig::classic();
        let mut rng = SpinRng::new(1, 0);
        let mut grid = losing_grid();
        let untouched = grid.clone();
        for _ in 0..100 {
            let injected = inject(
                &mut grid,
                &config.paylines,
                &config.paytable,
                config.symbols,
                0.0,
                &mut rng,
            );
            assert!(injected.is_none());
        }
        assert_eq!(grid, untouched);
    }

    #[test]
    fn test_injection_writes_the_two_match_pattern() {
        let config = SlotConfig::classic();
        for seed in 0..20 {
            let mut rng = SpinRng::new(seed, 0);
            let mut grid = losing_grid();
            let near_miss = inject(
                &mut grid,
                &config.paylines,
                &config.paytable,
                config.symbols,
                1.0,
                &mut rng,
            )
            .expect("frequency 1.0 always fires");

            let line = &config.paylines[near_miss.line_index];
            let breaker = near_miss.symbol.successor(config.symbols);
            for reel in 0..grid.reels() {
                let shown = grid.cell(reel, line.row(reel as usize));
                if reel < NEAR_MISS_MATCHED_REELS {
                    assert_eq!(shown, near_miss.symbol);
                } else {
                    assert_eq!(shown, breaker);
                }
            }
        }
    }

    #[test]
    fn test_injected_symbol_comes_from_the_pool() {
        let config = SlotConfig::classic();
        let pool = candidate_pool(&config.paytable, config.symbols);
        for seed in 0..50 {
            let mut rng = SpinRng::new(seed, 1);
            let mut grid = losing_grid();
            let near_miss = inject(
                &mut grid,
                &config.paylines,
                &config.paytable,
                config.symbols,
                1.0,
                &mut rng,
            )
            .unwrap();
            assert!(pool.contains(&near_miss.symbol));
        }
    }

    #[test]
    fn test_injected_line_never_pays() {
        // The crafted pattern is two matched reels, below the minimum run.
        let config = SlotConfig::classic();
        for seed in 0..50 {
            let mut rng = SpinRng::new(seed, 2);
            let mut grid = losing_grid();
            let near_miss = inject(
                &mut grid,
                &config.paylines,
                &config.paytable,
                config.symbols,
                1.0,
                &mut rng,
            )
            .unwrap();
            let line = &config.paylines[near_miss.line_index];
            let pass = settle_pass(&grid, std::slice::from_ref(line), &config.paytable, 1, 1.0);
            assert_eq!(pass.total, 0, "seed {seed} crafted a paying line");
        }
    }

    #[test]
    fn test_no_paylines_is_a_noop() {
        let config = SlotConfig::classic();
        let mut rng = SpinRng::new(3, 0);
        let mut grid = losing_grid();
        assert!(inject(&mut grid, &[], &config.paytable, config.symbols, 1.0, &mut rng).is_none());
    }
}
