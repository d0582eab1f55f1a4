//! Symbol identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque symbol identifier: an index into the session alphabet.
///
/// Symbols carry identity and ordering only. Draw frequency lives in
/// [`SymbolWeights`](crate::SymbolWeights) and payout semantics in the
/// [`Paytable`](crate::Paytable).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Symbol(pub u8);

/// The classic six-symbol alphabet, cheapest first.
pub const CHERRY: Symbol = Symbol(0);
pub const LEMON: Symbol = Symbol(1);
pub const ORANGE: Symbol = Symbol(2);
pub const STAR: Symbol = Symbol(3);
pub const BELL: Symbol = Symbol(4);
pub const DIAMOND: Symbol = Symbol(5);

impl Symbol {
    /// Position of this symbol in the alphabet.
    pub fn index(self) -> u8 {
        self.0
    }

    /// The next symbol in alphabet order, wrapping at the alphabet size.
    pub fn successor(self, alphabet: u8) -> Symbol {
        if alphabet == 0 {
            return self;
        }
        Symbol((self.0 + 1) % alphabet)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}
