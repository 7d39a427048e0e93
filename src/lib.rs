//! # basecount
//!
//! Per-position nucleotide call counts for one or more aligned read files against a
//! shared reference.
//!
//! For every position of every contig, `basecount` reports how many reads from each
//! alignment file placed an A, T, G, C, N or other base there. Bases are assigned to
//! reference positions by walking each read's CIGAR: matches land on the reference,
//! deletions and skips move along the reference without a base, insertions and soft
//! clips consume read bases that never land.
//!
//! Contigs are processed one at a time, so memory is bounded by the longest contig
//! times the number of files rather than by the genome.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use basecount::depth::controller::RunController;
//! use basecount::depth::RunConfig;
//! use basecount::output::{OutputFormat, ReportWriter};
//! use basecount::parsing::alignment::HtsSource;
//! use basecount::parsing::fai::resolve_reference;
//!
//! let reference = resolve_reference(Path::new("ref.fa")).unwrap();
//! let source = HtsSource::open(Path::new("sample.bam"), &reference).unwrap();
//!
//! let mut controller = RunController::new(vec![source], &RunConfig::default()).unwrap();
//! let mut report = ReportWriter::new(std::io::stdout().lock(), OutputFormat::Text);
//! controller.run(&mut report).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Contigs, alignment records, CIGAR operations, nucleotide categories
//! - [`parsing`]: Alignment sources and reference resolution (noodles)
//! - [`depth`]: CIGAR walking, the depth matrix, contig processing and run control
//! - [`output`]: Text and JSON report writers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod depth;
pub mod output;
pub mod parsing;

// Re-export commonly used types for convenience
pub use crate::core::contig::Contig;
pub use crate::core::nucleotide::{BaseCounts, NucleotideCall};
pub use crate::core::record::AlignmentRecord;
pub use crate::depth::controller::{RunController, RunSummary};
pub use crate::depth::matrix::DepthMatrix;
pub use crate::depth::RunConfig;
pub use crate::parsing::source::{AlignmentSource, SourceError};
