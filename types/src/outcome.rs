//! Win artifacts produced by cascade resolution, and the spin state machine.

use crate::symbol::Symbol;

/// One winning line within a single evaluation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinEvent {
    /// Index of the winning payline in the configuration.
    pub line_index: usize,
    /// The matched symbol at reel 0.
    pub symbol: Symbol,
    /// Length of the contiguous run starting at reel 0.
    pub count: u8,
    /// Line award in credits: tier multiplier, volatility and bet applied.
    pub payout: u64,
}

/// One evaluation pass of the cascade loop: the wins it settled and their sum.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CascadePass {
    pub wins: Vec<WinEvent>,
    pub total: u64,
}

/// Cosmetic mutation applied to a losing grid after settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NearMiss {
    /// The payline rewritten into the "two matched" pattern.
    pub line_index: usize,
    /// The symbol shown on the matched reels.
    pub symbol: Symbol,
}

/// The terminal artifact of one spin resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeResult {
    /// Accumulated payout across all passes.
    pub total: u64,
    /// The ordered passes that produced it.
    pub passes: Vec<CascadePass>,
    /// Near-miss presentation, if one was applied to a losing outcome.
    pub near_miss: Option<NearMiss>,
    /// Weight-table revision after resolution; differs from the pre-spin
    /// value when drift correction fired.
    pub weight_revision: u64,
}

/// Lifecycle of a spin.
///
/// Each spin runs a full `Idle -> .. -> Idle` cycle as an uninterruptible
/// unit; spin requests are rejected (not queued) unless the session is
/// `Idle`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinState {
    #[default]
    Idle = 0,
    Spinning = 1,
    Resolving = 2,
    Tumbling = 3,
}

impl SpinState {
    /// Whether `next` is a legal transition out of this state.
    ///
    /// `Resolving -> Idle` covers the zero-win spin that never tumbles.
    pub fn can_enter(self, next: SpinState) -> bool {
        use SpinState::*;
        matches!(
            (self, next),
            (Idle, Spinning)
                | (Spinning, Resolving)
                | (Resolving, Tumbling)
                | (Resolving, Idle)
                | (Tumbling, Idle)
        )
    }
}
