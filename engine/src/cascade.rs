//! The cascade resolver: the session state machine, the tumble loop, drift
//! correction, and balance accounting.

use crate::near_miss;
use crate::payline::settle_pass;
use crate::rng::SpinRng;
use reelworks_types::{
    CascadePass, CascadeResult, ConfigError, Grid, Paytable, Payline, SlotConfig, SpinError,
    SpinState, Symbol, SymbolWeights, WinEvent, DEFAULT_BET, MAX_CASCADE_PASSES, STARTING_CREDITS,
};
use std::collections::BTreeSet;

/// Per-pass notification payload, delivered to the step hook consumed by UI
/// and analytics collaborators.
#[derive(Clone, Copy, Debug)]
pub struct SpinStep<'a> {
    /// 1-based pass index within this spin.
    pub pass: u32,
    /// Wins settled by this pass.
    pub wins: &'a [WinEvent],
    /// This pass's total award.
    pub total: u64,
    /// Running accumulator including this pass.
    pub accumulated: u64,
}

fn enter(state: &mut SpinState, next: SpinState) {
    debug_assert!(
        state.can_enter(next),
        "illegal spin transition {:?} -> {:?}",
        state,
        next
    );
    *state = next;
}

/// Resolve one settled grid into zero or more cascading win passes.
///
/// Each pass evaluates every payline, commits the pass award through
/// `on_step`, replaces each winning cell exactly once (keyed by position, so
/// cells shared by several lines redraw a single time), and may nudge the
/// weight table. The loop exits on the first zero-total pass.
///
/// Termination otherwise relies on the finite alphabet and the shrinking
/// probability of chained matches, so a hard pass cap backstops pathological
/// weight configurations: exceeding it aborts with
/// [`SpinError::CascadeOverrun`] carrying what was settled. The pass that
/// tripped the cap is discarded; `on_step` has only ever seen committed
/// passes.
#[allow(clippy::too_many_arguments)]
pub fn resolve_spin<F>(
    grid: &mut Grid,
    bet: u64,
    weights: &mut SymbolWeights,
    paytable: &Paytable,
    paylines: &[Payline],
    volatility: f64,
    drift_rate: f64,
    rng: &mut SpinRng,
    mut on_step: F,
) -> Result<CascadeResult, SpinError>
where
    F: FnMut(&SpinStep<'_>),
{
    let mut passes: Vec<CascadePass> = Vec::new();
    let mut accumulated = 0u64;

    loop {
        let pass = settle_pass(grid, paylines, paytable, bet, volatility);
        if pass.total == 0 {
            break;
        }
        if passes.len() as u32 >= MAX_CASCADE_PASSES {
            tracing::error!(
                settled = accumulated,
                passes = passes.len(),
                "cascade exceeded its pass cap, aborting spin"
            );
            return Err(SpinError::CascadeOverrun {
                settled: accumulated,
                passes: passes.len() as u32,
            });
        }

        accumulated += pass.total;
        on_step(&SpinStep {
            pass: passes.len() as u32 + 1,
            wins: &pass.wins,
            total: pass.total,
            accumulated,
        });
        tracing::debug!(
            pass = passes.len() + 1,
            wins = pass.wins.len(),
            total = pass.total,
            accumulated,
            "cascade pass settled"
        );

        // Redraw each winning cell once, keyed by position rather than line.
        let mut matched: BTreeSet<(u8, u8)> = BTreeSet::new();
        for win in &pass.wins {
            let line = &paylines[win.line_index];
            for reel in 0..win.count {
                matched.insert((reel, line.row(reel as usize)));
            }
        }
        for &(reel, row) in &matched {
            grid.set_cell(reel, row, rng.draw_weighted(weights));
        }

        // Long-run drift correction: occasionally shave the top prize
        // symbol's weight, floor 1.
        if rng.chance(drift_rate) {
            if let Some(symbol) = paytable.top_paying_symbol() {
                let weight = weights.decrement(symbol);
                tracing::info!(
                    symbol = %symbol,
                    weight,
                    revision = weights.revision(),
                    "drift correction applied"
                );
            }
        }

        passes.push(pass);
    }

    Ok(CascadeResult {
        total: accumulated,
        passes,
        near_miss: None,
        weight_revision: weights.revision(),
    })
}

/// A player session: the owner of balance, bet, live configuration and the
/// spin state machine.
///
/// One resolution runs to completion at a time; a spin request while the
/// state is not `Idle` is rejected, never queued. Balance is written only by
/// the stake deduction at spin start and by committed pass awards.
#[derive(Clone, Debug)]
pub struct Session {
    config: SlotConfig,
    grid: Grid,
    balance: u64,
    bet: u64,
    state: SpinState,
    seed: u64,
    spins: u64,
}

impl Session {
    /// Create a session over a validated configuration.
    pub fn new(config: SlotConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::filled(config.reels, config.rows, Symbol::default());
        Ok(Self {
            config,
            grid,
            balance: STARTING_CREDITS,
            bet: DEFAULT_BET,
            state: SpinState::Idle,
            seed,
            spins: 0,
        })
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// The live weight table, including any drift applied so far.
    pub fn weights(&self) -> &SymbolWeights {
        &self.config.weights
    }

    /// Spins played so far; also the spin index of the next resolution.
    pub fn spins(&self) -> u64 {
        self.spins
    }

    /// Set the stake per spin, clamped to `1..=balance`.
    pub fn set_bet(&mut self, bet: u64) {
        self.bet = bet.clamp(1, self.balance.max(1));
    }

    /// Credit the balance.
    pub fn deposit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Run one full spin cycle: stake, refill, cascade resolution, and the
    /// near-miss pass on a losing outcome.
    pub fn spin(&mut self) -> Result<CascadeResult, SpinError> {
        self.spin_with(|_| {})
    }

    /// [`Session::spin`] with a per-pass step hook.
    pub fn spin_with<F>(&mut self, mut on_step: F) -> Result<CascadeResult, SpinError>
    where
        F: FnMut(&SpinStep<'_>),
    {
        if self.state != SpinState::Idle {
            return Err(SpinError::SpinInProgress { state: self.state });
        }
        if self.balance < self.bet {
            return Err(SpinError::InsufficientFunds {
                needed: self.bet,
                available: self.balance,
            });
        }

        let spin_index = self.spins;
        self.spins += 1;
        let mut rng = SpinRng::new(self.seed, spin_index);

        enter(&mut self.state, SpinState::Spinning);
        self.balance -= self.bet;
        tracing::info!(
            spin = spin_index,
            bet = self.bet,
            balance = self.balance,
            "spin started"
        );

        let Self {
            config,
            grid,
            balance,
            state,
            bet,
            ..
        } = self;
        let SlotConfig {
            symbols,
            weights,
            paytable,
            paylines,
            near_miss_frequency,
            drift_rate,
            volatility,
            ..
        } = config;

        grid.refill_with(|| rng.draw_weighted(weights));
        enter(state, SpinState::Resolving);

        let resolved = resolve_spin(
            grid,
            *bet,
            weights,
            paytable,
            paylines,
            *volatility,
            *drift_rate,
            &mut rng,
            |step| {
                if *state != SpinState::Tumbling {
                    enter(state, SpinState::Tumbling);
                }
                // Only completed, evaluated passes ever reach the balance.
                *balance = balance.saturating_add(step.total);
                on_step(step);
            },
        );

        let mut result = match resolved {
            Ok(result) => result,
            Err(err) => {
                enter(state, SpinState::Idle);
                return Err(err);
            }
        };

        if result.total == 0 {
            result.near_miss = near_miss::inject(
                grid,
                paylines,
                paytable,
                *symbols,
                *near_miss_frequency,
                &mut rng,
            );
        }

        enter(state, SpinState::Idle);
        tracing::info!(
            spin = spin_index,
            total = result.total,
            passes = result.passes.len(),
            near_miss = result.near_miss.is_some(),
            balance = *balance,
            "spin resolved"
        );
        Ok(result)
    }
}
