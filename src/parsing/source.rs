use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::contig::Contig;
use crate::core::record::AlignmentRecord;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Alignment file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported alignment format: {} (expected .bam or .cram)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("No index found for {} (looked for {candidates})", path.display())]
    MissingIndex { path: PathBuf, candidates: String },

    #[error("Reference FASTA not found: {}", .0.display())]
    MissingReference(PathBuf),

    #[error("Failed to index reference {}", path.display())]
    ReferenceIndexFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Contig '{contig}' not found in {}", path.display())]
    RegionNotFound { path: PathBuf, contig: String },

    #[error("Failed to query contig '{contig}' in {}", path.display())]
    Query {
        path: PathBuf,
        contig: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "Truncated or corrupt record stream for contig '{contig}' in {}",
        path.display()
    )]
    Truncated {
        path: PathBuf,
        contig: String,
        #[source]
        source: io::Error,
    },
}

/// Lazily produced records for one region query
pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<AlignmentRecord, SourceError>> + 'a>;

/// An opened, indexed stream of alignments.
///
/// Implementations own their file handles; dropping the source releases them.
pub trait AlignmentSource {
    /// Path the source was opened from
    fn path(&self) -> &Path;

    /// Contigs declared by the source, in header order
    fn targets(&self) -> &[Contig];

    /// Records overlapping the whole of `contig`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::RegionNotFound` if the contig is not among the source's
    /// targets, or `SourceError::Query` if the index lookup fails. Items of the
    /// returned iterator fail with `SourceError::Truncated` on a corrupt stream.
    fn query(&mut self, contig: &Contig) -> Result<RecordIter<'_>, SourceError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::{HashMap, HashSet};

    use super::*;

    /// In-memory source for exercising the depth engine
    pub struct MemorySource {
        path: PathBuf,
        targets: Vec<Contig>,
        records: HashMap<String, Vec<AlignmentRecord>>,
        truncated: HashSet<String>,
        pub queries: Vec<String>,
    }

    impl MemorySource {
        pub fn new(path: &str, targets: Vec<Contig>) -> Self {
            Self {
                path: PathBuf::from(path),
                targets,
                records: HashMap::new(),
                truncated: HashSet::new(),
                queries: Vec::new(),
            }
        }

        pub fn with_record(mut self, contig: &str, record: AlignmentRecord) -> Self {
            self.records
                .entry(contig.to_string())
                .or_default()
                .push(record);
            self
        }

        /// Fail after the last record of `contig`
        pub fn with_truncation(mut self, contig: &str) -> Self {
            self.truncated.insert(contig.to_string());
            self
        }
    }

    impl AlignmentSource for MemorySource {
        fn path(&self) -> &Path {
            &self.path
        }

        fn targets(&self) -> &[Contig] {
            &self.targets
        }

        fn query(&mut self, contig: &Contig) -> Result<RecordIter<'_>, SourceError> {
            if !self.targets.iter().any(|t| t.name == contig.name) {
                return Err(SourceError::RegionNotFound {
                    path: self.path.clone(),
                    contig: contig.name.clone(),
                });
            }
            self.queries.push(contig.name.clone());

            let records = self
                .records
                .get(&contig.name)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(Ok);

            if self.truncated.contains(&contig.name) {
                let error = SourceError::Truncated {
                    path: self.path.clone(),
                    contig: contig.name.clone(),
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "unexpected EOF"),
                };
                Ok(Box::new(records.chain(std::iter::once(Err(error)))))
            } else {
                Ok(Box::new(records))
            }
        }
    }
}
