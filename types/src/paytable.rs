//! Payout tiers and the symbol paytable.

use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Payout multipliers for one symbol, keyed by exact run length.
///
/// Counts are only meaningful in `3..=reel_count`; a missing count means the
/// run length pays nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayoutTier(BTreeMap<u8, u64>);

impl PayoutTier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, count: u8, payout: u64) {
        self.0.insert(count, payout);
    }

    /// Multiplier for an exact run length, if the tier pays it.
    pub fn get(&self, count: u8) -> Option<u64> {
        self.0.get(&count).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0.iter().map(|(&count, &payout)| (count, payout))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest multiplier across all counts; 0 for an empty tier.
    pub fn max_payout(&self) -> u64 {
        self.0.values().copied().max().unwrap_or(0)
    }
}

impl FromIterator<(u8, u64)> for PayoutTier {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Mapping from symbol to its payout tiers.
///
/// A symbol with no entry never pays. Entries must not reference symbols
/// without a weight entry; [`SlotConfig::validate`](crate::SlotConfig::validate)
/// enforces this at load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paytable(BTreeMap<Symbol, PayoutTier>);

impl Paytable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol, tier: PayoutTier) {
        self.0.insert(symbol, tier);
    }

    pub fn get(&self, symbol: Symbol) -> Option<&PayoutTier> {
        self.0.get(&symbol)
    }

    /// Tier for a symbol, created empty on first access.
    pub fn tier_mut(&mut self, symbol: Symbol) -> &mut PayoutTier {
        self.0.entry(symbol).or_default()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.contains_key(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &PayoutTier)> + '_ {
        self.0.iter().map(|(&symbol, tier)| (symbol, tier))
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbol with the largest single payout across its tiers; ties resolve
    /// to the lower symbol index. `None` for an empty paytable.
    pub fn top_paying_symbol(&self) -> Option<Symbol> {
        self.0
            .iter()
            .max_by_key(|entry| (entry.1.max_payout(), Reverse(*entry.0)))
            .map(|(&symbol, _)| symbol)
    }

    /// Symbols ordered by their best payout, highest first; ties resolve to
    /// the lower symbol index.
    pub fn ranked_by_payout(&self) -> Vec<Symbol> {
        let mut ranked: Vec<(Symbol, u64)> =
            self.0.iter().map(|(&symbol, tier)| (symbol, tier.max_payout())).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.into_iter().map(|(symbol, _)| symbol).collect()
    }
}

impl FromIterator<(Symbol, PayoutTier)> for Paytable {
    fn from_iter<I: IntoIterator<Item = (Symbol, PayoutTier)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{BELL, CHERRY, DIAMOND, LEMON};

    fn table() -> Paytable {
        [
            (CHERRY, [(3, 5), (4, 20), (5, 100)].into_iter().collect()),
            (BELL, [(3, 15), (4, 100), (5, 500)].into_iter().collect()),
            (DIAMOND, [(3, 50), (4, 300), (5, 2000)].into_iter().collect()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_tier_lookup() {
        let table = table();
        assert_eq!(table.get(CHERRY).and_then(|t| t.get(5)), Some(100));
        assert_eq!(table.get(CHERRY).and_then(|t| t.get(2)), None);
        assert!(table.get(LEMON).is_none());
    }

    #[test]
    fn test_top_paying_symbol() {
        assert_eq!(table().top_paying_symbol(), Some(DIAMOND));
        assert_eq!(Paytable::new().top_paying_symbol(), None);
    }

    #[test]
    fn test_top_paying_symbol_tie_prefers_lower_index() {
        let table: Paytable = [
            (CHERRY, [(3, 100)].into_iter().collect()),
            (BELL, [(3, 100)].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.top_paying_symbol(), Some(CHERRY));
    }

    #[test]
    fn test_ranked_by_payout() {
        assert_eq!(table().ranked_by_payout(), vec![DIAMOND, BELL, CHERRY]);
    }
}
