//! End-to-end counting over real indexed BAM files
//!
//! Each test writes a small coordinate-sorted BAM and its BAI with noodles, then runs
//! the binary and checks the report line by line.

use std::fs::File;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use noodles::bam::{self, bai};
use noodles::core::Position;
use noodles::csi::binning_index::index::reference_sequence::bin::Chunk;
use noodles::csi::binning_index::Indexer;
use noodles::sam;
use noodles::sam::alignment::io::Write as _;
use noodles::sam::alignment::record::cigar::op::{Kind, Op};
use noodles::sam::alignment::record::{Flags, MappingQuality};
use noodles::sam::alignment::record_buf::{RecordBuf, Sequence};
use noodles::sam::alignment::Record as _;
use noodles::sam::header::record::value::map::ReferenceSequence;
use noodles::sam::header::record::value::Map;
use tempfile::TempDir;

const ZERO: &str = "0,0,0,0,0,0";

fn basecount() -> Command {
    Command::cargo_bin("basecount").expect("binary should build")
}

fn write_reference(dir: &Path) -> PathBuf {
    let path = dir.join("ref.fa");
    std::fs::write(&path, ">chr1\nACGTACGTAC\n>chr2\nGGGG\n").expect("write reference");
    path
}

fn header() -> sam::Header {
    let length = |n| Map::<ReferenceSequence>::new(NonZeroUsize::new(n).unwrap());

    sam::Header::builder()
        .add_reference_sequence("chr1", length(10))
        .add_reference_sequence("chr2", length(4))
        .build()
}

/// A mapped read; `start` is 1-based as in SAM
fn read(
    contig: usize,
    start: usize,
    mapq: Option<u8>,
    cigar: &[(Kind, usize)],
    bases: &[u8],
) -> RecordBuf {
    let mut builder = RecordBuf::builder()
        .set_flags(Flags::empty())
        .set_reference_sequence_id(contig)
        .set_alignment_start(Position::try_from(start).unwrap())
        .set_cigar(cigar.iter().map(|&(kind, len)| Op::new(kind, len)).collect())
        .set_sequence(Sequence::from(bases.to_vec()));
    if let Some(mapq) = mapq {
        builder = builder.set_mapping_quality(MappingQuality::new(mapq).unwrap());
    }
    builder.build()
}

fn reads() -> Vec<RecordBuf> {
    vec![
        read(
            0,
            1,
            Some(60),
            &[
                (Kind::SoftClip, 2),
                (Kind::Match, 2),
                (Kind::Insertion, 1),
                (Kind::Match, 2),
            ],
            b"NNCCATT",
        ),
        read(0, 3, Some(60), &[(Kind::Match, 3)], b"ATG"),
        read(0, 5, Some(5), &[(Kind::Match, 2)], b"GG"),
        // No mapping quality is stored; it reads as 255
        read(
            0,
            7,
            None,
            &[(Kind::Match, 1), (Kind::Deletion, 1), (Kind::Match, 1)],
            b"AC",
        ),
        read(1, 2, Some(30), &[(Kind::Match, 2)], b"GA"),
    ]
}

/// Write `records` as a BAM at `path` and index it to `<path>.bai`
fn write_indexed_bam(path: &Path, records: &[RecordBuf]) {
    let header = header();

    let mut writer = bam::io::Writer::new(File::create(path).unwrap());
    writer.write_header(&header).unwrap();
    for record in records {
        writer.write_alignment_record(&header, record).unwrap();
    }
    writer.try_finish().unwrap();
    drop(writer);

    let mut reader = bam::io::reader::Builder.build_from_path(path).unwrap();
    let header = reader.read_header().unwrap();

    let mut record = bam::Record::default();
    let mut indexer = Indexer::default();
    let mut chunk_start = reader.get_ref().virtual_position();

    while reader.read_record(&mut record).unwrap() != 0 {
        let chunk_end = reader.get_ref().virtual_position();

        let context = match (
            record.reference_sequence_id().transpose().unwrap(),
            record.alignment_start().transpose().unwrap(),
            record.alignment_end().transpose().unwrap(),
        ) {
            (Some(id), Some(start), Some(end)) => {
                Some((id, start, end, !record.flags().is_unmapped()))
            }
            _ => None,
        };
        indexer
            .add_record(context, Chunk::new(chunk_start, chunk_end))
            .unwrap();

        chunk_start = chunk_end;
    }

    let index = indexer.build(header.reference_sequences().len());

    let mut bai_path = path.as_os_str().to_owned();
    bai_path.push(".bai");
    let mut writer = bai::io::Writer::new(File::create(PathBuf::from(bai_path)).unwrap());
    writer.write_index(&index).unwrap();
}

fn run(files: &[&PathBuf], extra: &[&str]) -> String {
    let output = basecount().args(files).args(extra).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_counts_from_indexed_bam() {
    let dir = TempDir::new().unwrap();
    let reference = write_reference(dir.path());
    let bam = dir.path().join("sample.bam");
    write_indexed_bam(&bam, &reads());

    let stdout = run(&[&reference, &bam], &["--min-mapq", "10"]);
    let lines: Vec<&str> = stdout.lines().collect();

    let files = format!("#Files\t{}", bam.display());
    let expected = vec![
        files.as_str(),
        "region=chr1\tlen=10",
        "0,0,0,1,0,0", // C from the first read, after its soft clip
        "0,0,0,1,0,0",
        "1,1,0,0,0,0", // T after the insertion, A from the second read
        "0,2,0,0,0,0",
        "0,0,1,0,0,0", // G; the low-quality GG read is skipped
        ZERO,
        "1,0,0,0,0,0",
        ZERO, // deletion
        "0,0,0,1,0,0",
        ZERO,
        "region=chr2\tlen=4",
        ZERO,
        "0,0,1,0,0,0",
        "1,0,0,0,0,0",
        ZERO,
    ];
    assert_eq!(lines, expected);
}

#[test]
fn test_low_quality_reads_count_without_threshold() {
    let dir = TempDir::new().unwrap();
    let reference = write_reference(dir.path());
    let bam = dir.path().join("sample.bam");
    write_indexed_bam(&bam, &reads());

    let stdout = run(&[&reference, &bam], &[]);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines[2 + 4], "0,0,2,0,0,0");
    assert_eq!(lines[2 + 5], "0,0,1,0,0,0");
}

#[test]
fn test_one_column_per_bam() {
    let dir = TempDir::new().unwrap();
    let reference = write_reference(dir.path());
    let first = dir.path().join("first.bam");
    let second = dir.path().join("second.bam");
    write_indexed_bam(&first, &reads());
    write_indexed_bam(&second, &reads()[4..]);

    let stdout = run(&[&reference, &first, &second], &["--contig", "chr2"]);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(
        lines[0],
        format!("#Files\t{}\t{}", first.display(), second.display())
    );
    assert_eq!(
        lines[1..],
        [
            "region=chr2\tlen=4",
            "0,0,0,0,0,0\t0,0,0,0,0,0",
            "0,0,1,0,0,0\t0,0,1,0,0,0",
            "1,0,0,0,0,0\t1,0,0,0,0,0",
            "0,0,0,0,0,0\t0,0,0,0,0,0",
        ]
    );
}
