//! Payline evaluation and per-pass settlement.

use reelworks_types::{
    CascadePass, Grid, Paytable, Payline, Symbol, WinEvent, VOLATILITY_MIN, VOLATILITY_PAYOUT_CAP,
};

/// A run of identical symbols from reel 0, resolved to its payout tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineWin {
    pub symbol: Symbol,
    pub count: u8,
    /// Raw tier multiplier, before volatility and bet scaling.
    pub tier: u64,
}

/// Longest contiguous run of the reel-0 symbol along `line`, looked up in
/// the paytable.
///
/// Runs must start at reel 0; the scan stops at the first mismatch, with no
/// wraparound and no non-contiguous matching. `None` when the run length has
/// no tier entry (a two-symbol run, or a tier simply absent). Side-effect
/// free.
pub fn evaluate_line(grid: &Grid, line: &Payline, paytable: &Paytable) -> Option<LineWin> {
    let first = grid.cell(0, line.row(0));
    let mut count: u8 = 1;
    for reel in 1..grid.reels() {
        if grid.cell(reel, line.row(reel as usize)) != first {
            break;
        }
        count += 1;
    }
    let tier = paytable.get(first)?.get(count)?;
    Some(LineWin {
        symbol: first,
        count,
        tier,
    })
}

/// Scale a tier multiplier by the clamped volatility, then by the bet.
fn line_payout(tier: u64, volatility: f64, bet: u64) -> u64 {
    let multiplier = volatility.clamp(VOLATILITY_MIN, VOLATILITY_PAYOUT_CAP);
    (tier as f64 * multiplier).floor() as u64 * bet
}

/// Evaluate every payline over the grid and sum the awards for one pass.
pub fn settle_pass(
    grid: &Grid,
    paylines: &[Payline],
    paytable: &Paytable,
    bet: u64,
    volatility: f64,
) -> CascadePass {
    let mut wins = Vec::new();
    let mut total = 0u64;
    for (line_index, line) in paylines.iter().enumerate() {
        let Some(win) = evaluate_line(grid, line, paytable) else {
            continue;
        };
        let payout = line_payout(win.tier, volatility, bet);
        total += payout;
        wins.push(WinEvent {
            line_index,
            symbol: win.symbol,
            count: win.count,
            payout,
        });
    }
    CascadePass { wins, total }
}
