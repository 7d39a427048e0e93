use std::slice;

use crate::core::cigar::CigarOp;
use crate::core::record::AlignmentRecord;

/// A query base aligned to a reference position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedBase {
    /// Zero-based reference position
    pub reference_position: u64,
    /// Zero-based offset into the read's sequence
    pub query_offset: usize,
}

/// Lazily walks a record's CIGAR, yielding every base aligned by a match
/// operation (`M`, `=`, `X`) in reference order.
///
/// Both coordinates are threaded through every operation: deletions and skips advance
/// only the reference, insertions and soft clips advance only the query, hard clips
/// and padding advance neither.
#[derive(Debug, Clone)]
pub struct CigarWalker<'a> {
    ops: slice::Iter<'a, CigarOp>,
    reference_position: u64,
    query_offset: usize,
    remaining: usize,
}

impl<'a> CigarWalker<'a> {
    #[must_use]
    pub fn new(record: &'a AlignmentRecord) -> Self {
        Self {
            ops: record.cigar.ops().iter(),
            reference_position: record.position,
            query_offset: 0,
            remaining: 0,
        }
    }
}

impl Iterator for CigarWalker<'_> {
    type Item = AlignedBase;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.remaining > 0 {
                let base = AlignedBase {
                    reference_position: self.reference_position,
                    query_offset: self.query_offset,
                };
                self.reference_position += 1;
                self.query_offset += 1;
                self.remaining -= 1;
                return Some(base);
            }

            let op = self.ops.next()?;
            match (op.kind.consumes_reference(), op.kind.consumes_query()) {
                (true, true) => self.remaining = op.len,
                (true, false) => self.reference_position += op.len as u64,
                (false, true) => self.query_offset += op.len,
                (false, false) => {}
            }
        }
    }
}
