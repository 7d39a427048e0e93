//! Command-line interface for basecount.
//!
//! ## Usage
//!
//! ```text
//! # Count calls for every contig of two BAM files
//! basecount ref.fa tumor.bam normal.bam > counts.txt
//!
//! # Only chrM, skipping reads with mapping quality below 20
//! basecount ref.fa sample.cram --contig chrM --min-mapq 20
//!
//! # JSON output to a file
//! basecount ref.fa sample.bam --format json --output counts.jsonl
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

pub mod count;

#[derive(Parser)]
#[command(name = "basecount")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Count nucleotide calls per reference position across BAM/CRAM files")]
#[command(
    long_about = "basecount tallies the bases observed at every position of every contig, separately for each alignment file.\n\nFor each position it reports one group of six counts per file, in the order A, T, G, C, N, other.\nAlignment files must be coordinate-sorted and indexed (.bai/.csi for BAM, .crai for CRAM) and must share the same contigs."
)]
pub struct Cli {
    /// Reference FASTA (a .fai index is built next to it if missing)
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Indexed BAM or CRAM files
    #[arg(required = true, num_args = 1..)]
    pub alignments: Vec<PathBuf>,

    /// Skip reads with a mapping quality below this value
    #[arg(short = 'q', long, default_value = "0")]
    pub min_mapq: u8,

    /// Only process these contigs (may be repeated)
    #[arg(short, long = "contig", value_name = "NAME")]
    pub contigs: Vec<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["basecount", "ref.fa", "a.bam"]).unwrap();
        assert_eq!(cli.reference, PathBuf::from("ref.fa"));
        assert_eq!(cli.alignments, vec![PathBuf::from("a.bam")]);
        assert_eq!(cli.min_mapq, 0);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.contigs.is_empty());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "basecount", "ref.fa", "a.bam", "b.cram", "-q", "20", "-c", "chr1", "--contig",
            "chrM", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.alignments.len(), 2);
        assert_eq!(cli.min_mapq, 20);
        assert_eq!(cli.contigs, vec!["chr1".to_string(), "chrM".to_string()]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_requires_an_alignment_file() {
        assert!(Cli::try_parse_from(["basecount", "ref.fa"]).is_err());
        assert!(Cli::try_parse_from(["basecount"]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_quality() {
        assert!(Cli::try_parse_from(["basecount", "ref.fa", "a.bam", "-q", "256"]).is_err());
    }
}
