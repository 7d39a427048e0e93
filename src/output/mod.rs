//! Report writers for finished depth matrices.
//!
//! - **text**: `#Files` preamble, then a `region=<name>\tlen=<length>` line per contig
//!   followed by one line per position with a tab-separated `a,t,g,c,n,other` group
//!   per source
//! - **json**: the same content as newline-delimited JSON objects

use std::io::{self, Write};
use std::path::PathBuf;

use crate::core::contig::Contig;
use crate::depth::matrix::DepthMatrix;

pub mod json;
pub mod text;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Writes a report in the selected format to any byte sink
pub struct ReportWriter<W: Write> {
    inner: W,
    format: OutputFormat,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W, format: OutputFormat) -> Self {
        Self { inner, format }
    }

    /// Write the line naming every alignment file, in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_preamble(&mut self, paths: &[PathBuf]) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => text::write_preamble(&mut self.inner, paths),
            OutputFormat::Json => json::write_preamble(&mut self.inner, paths),
        }
    }

    /// Write one contig's counts, every position in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_contig(&mut self, contig: &Contig, matrix: &DepthMatrix) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => text::write_contig(&mut self.inner, contig, matrix),
            OutputFormat::Json => json::write_contig(&mut self.inner, contig, matrix),
        }
    }

    /// Flush buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
