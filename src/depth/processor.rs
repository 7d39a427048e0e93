use std::ops::AddAssign;

use tracing::{debug, warn};

use crate::core::contig::Contig;
use crate::depth::matrix::DepthMatrix;
use crate::depth::walker::CigarWalker;
use crate::depth::DepthError;
use crate::parsing::source::{AlignmentSource, SourceError};

/// Tallies from accumulating one contig
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContigStats {
    /// Records returned by the region queries
    pub records: u64,
    /// Records skipped for low mapping quality
    pub filtered: u64,
    /// Aligned bases counted into the matrix
    pub bases: u64,
    /// Aligned bases that fell outside the contig
    pub clipped: u64,
    /// Aligned bases with no stored sequence (SEQ `*` or a short sequence)
    pub unsequenced: u64,
}

impl AddAssign for ContigStats {
    fn add_assign(&mut self, rhs: Self) {
        self.records += rhs.records;
        self.filtered += rhs.filtered;
        self.bases += rhs.bases;
        self.clipped += rhs.clipped;
        self.unsequenced += rhs.unsequenced;
    }
}

/// Fills a depth matrix for one contig from every source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContigProcessor {
    min_mapping_quality: u8,
}

impl ContigProcessor {
    #[must_use]
    pub fn new(min_mapping_quality: u8) -> Self {
        Self {
            min_mapping_quality,
        }
    }

    /// Query the whole of `contig` in each source, in source order, and count every
    /// aligned base of each record that passes the mapping-quality threshold.
    ///
    /// The matrix is only returned once every source has been drained.
    ///
    /// # Errors
    ///
    /// Returns `DepthError::ContigTooLarge` if the contig cannot be addressed in
    /// memory, or `DepthError::Source` if a query or the record stream fails.
    pub fn process<S: AlignmentSource>(
        &self,
        contig: &Contig,
        sources: &mut [S],
    ) -> Result<(DepthMatrix, ContigStats), DepthError> {
        let length = usize::try_from(contig.length).map_err(|_| DepthError::ContigTooLarge {
            contig: contig.name.clone(),
            length: contig.length,
        })?;

        let mut matrix = DepthMatrix::new(length, sources.len());
        let mut stats = ContigStats::default();

        for (index, source) in sources.iter_mut().enumerate() {
            let source_stats = self.accumulate(contig, index, source, &mut matrix)?;

            debug!(
                contig = %contig.name,
                path = %source.path().display(),
                records = source_stats.records,
                filtered = source_stats.filtered,
                bases = source_stats.bases,
                unsequenced = source_stats.unsequenced,
                "Drained source"
            );
            if source_stats.clipped > 0 {
                warn!(
                    contig = %contig.name,
                    path = %source.path().display(),
                    bases = source_stats.clipped,
                    "Aligned bases outside the contig were ignored"
                );
            }
            if source_stats.unsequenced > 0 {
                warn!(
                    contig = %contig.name,
                    path = %source.path().display(),
                    bases = source_stats.unsequenced,
                    "Aligned bases without a stored sequence were ignored"
                );
            }

            stats += source_stats;
        }

        Ok((matrix, stats))
    }

    #[allow(clippy::cast_possible_truncation)] // Bounded by the matrix length
    fn accumulate<S: AlignmentSource>(
        &self,
        contig: &Contig,
        index: usize,
        source: &mut S,
        matrix: &mut DepthMatrix,
    ) -> Result<ContigStats, SourceError> {
        let mut stats = ContigStats::default();

        for result in source.query(contig)? {
            let record = result?;
            stats.records += 1;

            if record.mapping_quality < self.min_mapping_quality {
                stats.filtered += 1;
                continue;
            }

            for base in CigarWalker::new(&record) {
                if !contig.contains(base.reference_position) {
                    stats.clipped += 1;
                    continue;
                }
                let Some(call) = record.call_at(base.query_offset) else {
                    stats.unsequenced += 1;
                    continue;
                };

                matrix.record(base.reference_position as usize, index, call);
                stats.bases += 1;
            }
        }

        Ok(stats)
    }
}
