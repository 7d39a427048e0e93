//! Depth accumulation engine.
//!
//! For each contig (taken from the first source's target list) every source is asked
//! for all records on the contig. Each record that passes the mapping-quality
//! threshold is walked along its CIGAR, and every base aligned by a match operation is
//! counted into a per-contig [`DepthMatrix`]. The finished matrix is written out and
//! dropped before the next contig is allocated, so peak memory is bounded by the
//! longest contig times the number of sources.
//!
//! - [`walker`]: Turns one record into (reference position, query offset) pairs
//! - [`matrix`]: The dense per-contig count table
//! - [`processor`]: Drains every source for one contig into a matrix
//! - [`controller`]: Validates sources and sequences contigs through processing and output
//!
//! [`DepthMatrix`]: matrix::DepthMatrix

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parsing::source::SourceError;

pub mod controller;
pub mod matrix;
pub mod processor;
pub mod walker;

#[derive(Error, Debug)]
pub enum DepthError {
    #[error("No alignment files given")]
    NoSources,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(
        "Contigs of {} do not match {}: {reason}",
        path.display(),
        first.display()
    )]
    TargetSetMismatch {
        path: PathBuf,
        first: PathBuf,
        reason: String,
    },

    #[error("Contig '{0}' is not present in the alignment files")]
    UnknownContig(String),

    #[error("Contig '{contig}' is too long to count in memory ({length} bases)")]
    ContigTooLarge { contig: String, length: u64 },

    #[error("Failed to write report")]
    Output(#[source] io::Error),
}

/// Settings for a depth run
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Records with a mapping quality below this are skipped entirely
    pub min_mapping_quality: u8,

    /// Restrict the run to these contigs; `None` processes every contig
    pub contigs: Option<Vec<String>>,
}
