//! The weighted symbol distribution owned by a session configuration.

use crate::symbol::Symbol;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Raw integer draw weights per symbol.
///
/// The table is owned by session-level configuration and read everywhere;
/// the only writer after load is the drift-correction step of the cascade
/// resolver, which decrements a single symbol's weight (floor 1). Every
/// mutation bumps `revision`, so callers can observe that the live
/// distribution has diverged from the configured one.
///
/// Serializes as the bare symbol-to-weight map; `revision` is runtime
/// state and a freshly loaded table always starts at revision 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolWeights {
    weights: BTreeMap<Symbol, u32>,
    revision: u64,
}

impl Serialize for SymbolWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.weights.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SymbolWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let weights = BTreeMap::deserialize(deserializer)?;
        Ok(Self {
            weights,
            revision: 0,
        })
    }
}

impl SymbolWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight for a symbol, replacing any previous entry.
    pub fn insert(&mut self, symbol: Symbol, weight: u32) {
        self.weights.insert(symbol, weight);
    }

    /// Weight for a symbol; 0 when the symbol has no entry.
    pub fn get(&self, symbol: Symbol) -> u32 {
        self.weights.get(&symbol).copied().unwrap_or(0)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.weights.contains_key(&symbol)
    }

    /// Sum of all weights.
    pub fn total(&self) -> u64 {
        self.weights.values().map(|&w| w as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u32)> + '_ {
        self.weights.iter().map(|(&symbol, &weight)| (symbol, weight))
    }

    /// Symbols with a weight entry, in order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.weights.keys().copied()
    }

    /// Number of mutations applied since load.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Shave one unit off a symbol's weight, never below 1.
    ///
    /// Returns the resulting weight (0 when the symbol has no entry). The
    /// revision advances only when the weight actually changed.
    pub fn decrement(&mut self, symbol: Symbol) -> u32 {
        let Some(weight) = self.weights.get_mut(&symbol) else {
            return 0;
        };
        if *weight > 1 {
            *weight -= 1;
            self.revision += 1;
        }
        *weight
    }
}

impl FromIterator<(Symbol, u32)> for SymbolWeights {
    fn from_iter<I: IntoIterator<Item = (Symbol, u32)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
            revision: 0,
        }
    }
}
