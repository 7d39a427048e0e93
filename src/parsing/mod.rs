//! Collaborators that supply alignments and the reference.
//!
//! - **source**: The [`AlignmentSource`] trait the depth engine reads from, and
//!   [`SourceError`]
//! - **alignment**: Indexed BAM/CRAM files opened with noodles
//! - **fai**: Reference FASTA resolution, building a `.fai` index when absent
//!
//! ## Index conventions
//!
//! | Format | Index looked up |
//! |--------|-----------------|
//! | BAM    | `<file>.bai`, then `<file>.csi` |
//! | CRAM   | `<file>.crai` |
//! | FASTA  | `<file>.fai` (built if missing) |
//!
//! Alignment indexes are never created; a missing one fails the run.
//!
//! [`AlignmentSource`]: source::AlignmentSource
//! [`SourceError`]: source::SourceError

pub mod alignment;
pub mod fai;
pub mod source;
