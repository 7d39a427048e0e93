//! Core data types for depth accumulation.
//!
//! - [`Contig`]: A named reference sequence with a length
//! - [`AlignmentRecord`]: One aligned read reduced to position, mapping quality, CIGAR and bases
//! - [`Cigar`], [`CigarOp`], [`CigarKind`]: Alignment operations
//! - [`NucleotideCall`], [`BaseCounts`]: The six report categories and their per-cell counts
//!
//! Positions are zero-based throughout. A count group is always ordered
//! A, T, G, C, N, other.
//!
//! [`Contig`]: contig::Contig
//! [`AlignmentRecord`]: record::AlignmentRecord
//! [`Cigar`]: cigar::Cigar
//! [`CigarOp`]: cigar::CigarOp
//! [`CigarKind`]: cigar::CigarKind
//! [`NucleotideCall`]: nucleotide::NucleotideCall
//! [`BaseCounts`]: nucleotide::BaseCounts

pub mod cigar;
pub mod contig;
pub mod nucleotide;
pub mod record;
