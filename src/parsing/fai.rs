//! Reference FASTA resolution using noodles.
//!
//! The FASTA index (`<reference>.fai`) is read when present and built next to the
//! FASTA when absent. FAI format: `name\tlength\toffset\tline_bases\tline_width`

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use noodles::fasta;
use tracing::{info, warn};

use crate::core::contig::Contig;
use crate::parsing::source::SourceError;

/// A reference FASTA with a usable index
#[derive(Debug, Clone)]
pub struct Reference {
    path: PathBuf,
    contigs: Vec<Contig>,
}

impl Reference {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Contigs from the FASTA index, in file order
    #[must_use]
    pub fn contigs(&self) -> &[Contig] {
        &self.contigs
    }

    /// Build a sequence repository for decoding reference-compressed (CRAM) records.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::ReferenceIndexFailure` if the indexed FASTA cannot be opened.
    pub fn repository(&self) -> Result<fasta::Repository, SourceError> {
        let reader = fasta::io::indexed_reader::Builder::default()
            .build_from_path(&self.path)
            .map_err(|source| SourceError::ReferenceIndexFailure {
                path: self.path.clone(),
                source,
            })?;

        let adapter = fasta::repository::adapters::IndexedReader::new(reader);
        Ok(fasta::Repository::new(adapter))
    }

    /// Names of contigs that both the reference and `targets` declare, but with
    /// different lengths
    #[must_use]
    pub fn length_mismatches(&self, targets: &[Contig]) -> Vec<String> {
        let lengths: HashMap<&str, u64> = self
            .contigs
            .iter()
            .map(|c| (c.name.as_str(), c.length))
            .collect();

        targets
            .iter()
            .filter(|t| lengths.get(t.name.as_str()).is_some_and(|&l| l != t.length))
            .map(|t| t.name.clone())
            .collect()
    }

    /// Log contigs whose reference length disagrees with the alignment header
    pub fn warn_on_mismatches(&self, targets: &[Contig]) {
        for name in self.length_mismatches(targets) {
            warn!(
                contig = %name,
                reference = %self.path.display(),
                "Contig length differs between reference and alignment header"
            );
        }
    }
}

/// Path of the index that accompanies a FASTA file
#[must_use]
pub fn fai_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".fai");
    PathBuf::from(name)
}

/// Locate a reference FASTA and make sure it is indexed.
///
/// # Errors
///
/// Returns `SourceError::MissingReference` if the FASTA does not exist, or
/// `SourceError::ReferenceIndexFailure` if the index can neither be read nor built.
pub fn resolve_reference(path: &Path) -> Result<Reference, SourceError> {
    if !path.is_file() {
        return Err(SourceError::MissingReference(path.to_path_buf()));
    }

    let index_path = fai_path(path);
    let index = if index_path.is_file() {
        read_fai_file(&index_path)
    } else {
        build_fai_file(path, &index_path)
    }
    .map_err(|source| SourceError::ReferenceIndexFailure {
        path: path.to_path_buf(),
        source,
    })?;

    let contigs = index_to_contigs(&index);
    if contigs.is_empty() {
        return Err(SourceError::ReferenceIndexFailure {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, "no contigs found in FAI"),
        });
    }

    Ok(Reference {
        path: path.to_path_buf(),
        contigs,
    })
}

fn read_fai_file(index_path: &Path) -> io::Result<fasta::fai::Index> {
    let reader = File::open(index_path).map(BufReader::new)?;
    fasta::fai::io::Reader::new(reader).read_index()
}

fn build_fai_file(path: &Path, index_path: &Path) -> io::Result<fasta::fai::Index> {
    info!(reference = %path.display(), "Building FASTA index");

    let index = fasta::io::index(path)?;
    persist_index(&index, index_path)?;

    Ok(index)
}

/// Stage `index` next to `index_path` and rename it into place. A failed write
/// removes the staging file.
fn persist_index(index: &fasta::fai::Index, index_path: &Path) -> io::Result<()> {
    let mut name = index_path.as_os_str().to_owned();
    name.push(".tmp");
    let staging = PathBuf::from(name);

    let result = File::create(&staging)
        .map(|file| fasta::fai::io::Writer::new(BufWriter::new(file)))
        .and_then(|mut writer| {
            writer.write_index(index)?;
            writer.get_mut().flush()
        })
        .and_then(|()| fs::rename(&staging, index_path));

    if result.is_err() && staging.exists() {
        if let Err(error) = fs::remove_file(&staging) {
            warn!(path = %staging.display(), %error, "Failed to remove partial FASTA index");
        }
    }

    result
}

/// Convert noodles FAI index to contigs
fn index_to_contigs(index: &fasta::fai::Index) -> Vec<Contig> {
    index
        .as_ref()
        .iter()
        .map(|record| {
            let name = String::from_utf8_lossy(record.name()).to_string();
            Contig::new(name, record.length())
        })
        .collect()
}
