//! Payline paths.

use serde::{Deserialize, Serialize};

/// A fixed path across the reels: one visible row index per reel.
///
/// All paylines in a configuration share the same length (the reel count)
/// and every row index stays within the visible-row bound; both are enforced
/// by [`SlotConfig::validate`](crate::SlotConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payline(Vec<u8>);

impl Payline {
    pub fn new(rows: Vec<u8>) -> Self {
        Self(rows)
    }

    /// Number of reels this line spans.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Row index on the given reel.
    pub fn row(&self, reel: usize) -> u8 {
        self.0[reel]
    }

    pub fn rows(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Payline {
    fn from(rows: Vec<u8>) -> Self {
        Self(rows)
    }
}
