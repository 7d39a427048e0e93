use std::fmt;

use serde::Serialize;

/// Report category for a single base call.
///
/// The discriminants double as the column order of a count group: A, T, G, C, N, other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NucleotideCall {
    A = 0,
    T = 1,
    G = 2,
    C = 3,
    N = 4,
    Other = 5,
}

impl NucleotideCall {
    /// Number of report categories
    pub const COUNT: usize = 6;

    /// Column of this category within a count group
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl From<u8> for NucleotideCall {
    /// Bucket an IUPAC base letter. Anything outside A/T/G/C/N (ambiguity codes, `=`,
    /// gaps) is `Other`.
    fn from(symbol: u8) -> Self {
        match symbol {
            b'A' | b'a' => NucleotideCall::A,
            b'T' | b't' => NucleotideCall::T,
            b'G' | b'g' => NucleotideCall::G,
            b'C' | b'c' => NucleotideCall::C,
            b'N' | b'n' => NucleotideCall::N,
            _ => NucleotideCall::Other,
        }
    }
}

/// Counts for the six report categories at one position for one source.
///
/// Cells are `u32` and saturate rather than wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BaseCounts([u32; NucleotideCall::COUNT]);

impl BaseCounts {
    #[inline]
    pub fn increment(&mut self, call: NucleotideCall) {
        let cell = &mut self.0[call.index()];
        *cell = cell.saturating_add(1);
    }

    #[inline]
    #[must_use]
    pub fn get(&self, call: NucleotideCall) -> u32 {
        self.0[call.index()]
    }

    /// Sum over all categories
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }
}

impl From<[u32; NucleotideCall::COUNT]> for BaseCounts {
    fn from(counts: [u32; NucleotideCall::COUNT]) -> Self {
        Self(counts)
    }
}

impl fmt::Display for BaseCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, t, g, c, n, other] = self.0;
        write!(f, "{a},{t},{g},{c},{n},{other}")
    }
}
