use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use noodles::core::Region;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::{Cigar as _, Sequence as _};
use noodles::{bam, bgzf, cram, sam};
use tracing::debug;

use crate::core::cigar::{Cigar, CigarKind, CigarOp};
use crate::core::contig::Contig;
use crate::core::record::{AlignmentRecord, MISSING_MAPPING_QUALITY};
use crate::parsing::fai::Reference;
use crate::parsing::source::{AlignmentSource, RecordIter, SourceError};

/// Alignment container formats that support indexed region queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Bam,
    Cram,
}

impl AlignmentFormat {
    /// Detect the format from the file extension
    #[must_use]
    pub fn detect(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("bam") => Some(AlignmentFormat::Bam),
            Some("cram") => Some(AlignmentFormat::Cram),
            _ => None,
        }
    }

    /// Index files that may accompany an alignment file, in lookup order
    #[must_use]
    pub fn index_candidates(self, path: &Path) -> Vec<PathBuf> {
        let suffixes: &[&str] = match self {
            AlignmentFormat::Bam => &["bai", "csi"],
            AlignmentFormat::Cram => &["crai"],
        };

        suffixes
            .iter()
            .map(|suffix| {
                let mut name = path.as_os_str().to_owned();
                name.push(".");
                name.push(suffix);
                PathBuf::from(name)
            })
            .collect()
    }
}

/// Find the co-located index for an alignment file. Indexes are never built here.
///
/// # Errors
///
/// Returns `SourceError::MissingIndex` if none of the conventional index paths exist.
pub fn find_index(path: &Path, format: AlignmentFormat) -> Result<PathBuf, SourceError> {
    let candidates = format.index_candidates(path);

    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .ok_or_else(|| SourceError::MissingIndex {
            path: path.to_path_buf(),
            candidates: candidates
                .iter()
                .map(|c| c.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

enum Reader {
    Bam(bam::io::IndexedReader<bgzf::Reader<File>>),
    Cram(cram::io::IndexedReader<File>),
}

/// An indexed BAM or CRAM file opened with noodles
pub struct HtsSource {
    path: PathBuf,
    format: AlignmentFormat,
    header: sam::Header,
    targets: Vec<Contig>,
    reader: Reader,
}

impl HtsSource {
    /// Open an indexed alignment file.
    ///
    /// CRAM records are decoded against `reference`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if the file does not exist,
    /// `SourceError::UnsupportedFormat` for extensions other than `.bam`/`.cram`,
    /// `SourceError::MissingIndex` if no index accompanies the file,
    /// `SourceError::ReferenceIndexFailure` if the reference cannot back a CRAM, or
    /// `SourceError::Open` if the file or its header cannot be read.
    pub fn open(path: &Path, reference: &Reference) -> Result<Self, SourceError> {
        if !path.is_file() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }

        let format = AlignmentFormat::detect(path)
            .ok_or_else(|| SourceError::UnsupportedFormat(path.to_path_buf()))?;

        let index = find_index(path, format)?;
        debug!(path = %path.display(), index = %index.display(), "Found alignment index");

        let open_error = |source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = match format {
            AlignmentFormat::Bam => bam::io::indexed_reader::Builder::default()
                .build_from_path(path)
                .map(Reader::Bam),
            AlignmentFormat::Cram => cram::io::indexed_reader::Builder::default()
                .set_reference_sequence_repository(reference.repository()?)
                .build_from_path(path)
                .map(Reader::Cram),
        }
        .map_err(open_error)?;

        let header = match &mut reader {
            Reader::Bam(r) => r.read_header(),
            Reader::Cram(r) => r.read_header(),
        }
        .map_err(open_error)?;

        let targets = header_to_targets(&header);

        Ok(Self {
            path: path.to_path_buf(),
            format,
            header,
            targets,
            reader,
        })
    }

    #[must_use]
    pub fn format(&self) -> AlignmentFormat {
        self.format
    }
}

impl AlignmentSource for HtsSource {
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

        let region = Region::new(contig.name.as_str(), ..);
        let path = self.path.clone();
        let query_error = |source| SourceError::Query {
            path: path.clone(),
            contig: contig.name.clone(),
            source,
        };

        let header = &self.header;
        let records = match &mut self.reader {
            Reader::Bam(reader) => {
                let query = reader.query(header, &region).map_err(query_error)?;
                convert_records(query, path.clone(), contig.name.clone())
            }
            Reader::Cram(reader) => {
                let query = reader.query(header, &region).map_err(query_error)?;
                convert_records(query, path.clone(), contig.name.clone())
            }
        };

        Ok(records)
    }
}

impl Drop for HtsSource {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "Closing alignment source");
    }
}

/// Convert noodles header to the ordered target list
fn header_to_targets(header: &sam::Header) -> Vec<Contig> {
    header
        .reference_sequences()
        .iter()
        .map(|(name, map)| Contig::new(name.to_string(), map.length().get() as u64))
        .collect()
}

fn convert_records<'a, I, R>(records: I, path: PathBuf, contig: String) -> RecordIter<'a>
where
    I: Iterator<Item = io::Result<R>> + 'a,
    R: sam::alignment::Record,
{
    Box::new(records.filter_map(move |result| {
        result
            .and_then(|record| to_alignment_record(&record))
            .map_err(|source| SourceError::Truncated {
                path: path.clone(),
                contig: contig.clone(),
                source,
            })
            .transpose()
    }))
}

/// Reduce a noodles record to what the depth engine reads.
///
/// Records without an alignment start cannot land on the reference and yield `None`.
fn to_alignment_record<R>(record: &R) -> io::Result<Option<AlignmentRecord>>
where
    R: sam::alignment::Record + ?Sized,
{
    let Some(start) = sam::alignment::Record::alignment_start(record).transpose()? else {
        return Ok(None);
    };
    let position = u64::try_from(start.get() - 1)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mapping_quality = sam::alignment::Record::mapping_quality(record)
        .transpose()?
        .map_or(MISSING_MAPPING_QUALITY, |mq| mq.get());

    let cigar = sam::alignment::Record::cigar(record)
        .iter()
        .map(|result| result.map(|op| CigarOp::new(cigar_kind(op.kind()), op.len())))
        .collect::<io::Result<Cigar>>()?;

    let sequence: Vec<u8> = sam::alignment::Record::sequence(record).iter().collect();

    Ok(Some(AlignmentRecord::new(
        position,
        mapping_quality,
        cigar,
        sequence,
    )))
}

fn cigar_kind(kind: Kind) -> CigarKind {
    match kind {
        Kind::Match => CigarKind::Match,
        Kind::Insertion => CigarKind::Insertion,
        Kind::Deletion => CigarKind::Deletion,
        Kind::Skip => CigarKind::Skip,
        Kind::SoftClip => CigarKind::SoftClip,
        Kind::HardClip => CigarKind::HardClip,
        Kind::Pad => CigarKind::Pad,
        Kind::SequenceMatch => CigarKind::SequenceMatch,
        Kind::SequenceMismatch => CigarKind::SequenceMismatch,
    }
}
