use crate::core::nucleotide::{BaseCounts, NucleotideCall};

/// Per-position, per-source base counts for a single contig.
///
/// Cells are stored position-major: all sources for position 0, then all sources for
/// position 1, and so on. The matrix is zeroed on construction and is never reused
/// across contigs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthMatrix {
    length: usize,
    sources: usize,
    cells: Vec<BaseCounts>,
}

impl DepthMatrix {
    /// Allocate a zeroed matrix for `length` positions and `sources` sources
    #[must_use]
    pub fn new(length: usize, sources: usize) -> Self {
        debug_assert!(sources > 0, "a depth matrix needs at least one source");

        Self {
            length,
            sources,
            cells: vec![BaseCounts::default(); length * sources],
        }
    }

    /// Number of reference positions
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub fn sources(&self) -> usize {
        self.sources
    }

    /// Count one call at `position` for `source`. Positions or sources outside the
    /// matrix are ignored.
    #[inline]
    pub fn record(&mut self, position: usize, source: usize, call: NucleotideCall) {
        if position >= self.length || source >= self.sources {
            return;
        }
        self.cells[position * self.sources + source].increment(call);
    }

    #[must_use]
    pub fn get(&self, position: usize, source: usize) -> Option<&BaseCounts> {
        if position >= self.length || source >= self.sources {
            return None;
        }
        self.cells.get(position * self.sources + source)
    }

    /// Rows in ascending position order
    pub fn rows(&self) -> impl Iterator<Item = &[BaseCounts]> + '_ {
        self.cells.chunks_exact(self.sources.max(1))
    }

    /// Sum of every cell contributed by `source`
    #[must_use]
    pub fn source_total(&self, source: usize) -> u64 {
        self.rows()
            .filter_map(|row| row.get(source))
            .map(BaseCounts::total)
            .sum()
    }
}
