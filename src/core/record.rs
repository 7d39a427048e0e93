use crate::core::cigar::Cigar;
use crate::core::nucleotide::NucleotideCall;

/// Mapping quality assumed when a record carries none (SAM `255`)
pub const MISSING_MAPPING_QUALITY: u8 = 255;

/// One aligned read, reduced to what depth accumulation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    /// Zero-based leftmost reference position
    pub position: u64,

    pub mapping_quality: u8,

    pub cigar: Cigar,

    /// Decoded IUPAC base letters, one per query base
    pub sequence: Vec<u8>,
}

impl AlignmentRecord {
    pub fn new(position: u64, mapping_quality: u8, cigar: Cigar, sequence: Vec<u8>) -> Self {
        Self {
            position,
            mapping_quality,
            cigar,
            sequence,
        }
    }

    /// Report category of the query base at `offset`, if the read has one there
    #[must_use]
    pub fn call_at(&self, offset: usize) -> Option<NucleotideCall> {
        self.sequence.get(offset).map(|&b| NucleotideCall::from(b))
    }
}
