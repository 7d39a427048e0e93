use std::io::{self, Write};
use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::core::contig::Contig;
use crate::depth::matrix::DepthMatrix;

#[derive(Serialize)]
struct Preamble {
    files: Vec<String>,
}

#[derive(Serialize)]
struct ContigReport<'a> {
    region: &'a str,
    length: u64,
    counts: Rows<'a>,
}

/// Streams matrix rows without copying them
struct Rows<'a>(&'a DepthMatrix);

impl Serialize for Rows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.rows())
    }
}

pub fn write_preamble<W: Write>(writer: &mut W, paths: &[PathBuf]) -> io::Result<()> {
    let preamble = Preamble {
        files: paths.iter().map(|p| p.display().to_string()).collect(),
    };
    serde_json::to_writer(&mut *writer, &preamble)?;
    writer.write_all(b"\n")
}

pub fn write_contig<W: Write>(
    writer: &mut W,
    contig: &Contig,
    matrix: &DepthMatrix,
) -> io::Result<()> {
    let report = ContigReport {
        region: &contig.name,
        length: contig.length,
        counts: Rows(matrix),
    };
    serde_json::to_writer(&mut *writer, &report)?;
    writer.write_all(b"\n")
}
