use std::io::{self, Write};
use std::path::PathBuf;

use crate::core::contig::Contig;
use crate::depth::matrix::DepthMatrix;

pub fn write_preamble<W: Write>(writer: &mut W, paths: &[PathBuf]) -> io::Result<()> {
    writer.write_all(b"#Files")?;
    for path in paths {
        write!(writer, "\t{}", path.display())?;
    }
    writer.write_all(b"\n")
}

pub fn write_contig<W: Write>(
    writer: &mut W,
    contig: &Contig,
    matrix: &DepthMatrix,
) -> io::Result<()> {
    writeln!(writer, "region={}\tlen={}", contig.name, contig.length)?;

    for row in matrix.rows() {
        for (i, counts) in row.iter().enumerate() {
            if i > 0 {
                writer.write_all(b"\t")?;
            }
            write!(writer, "{counts}")?;
        }
        writer.write_all(b"\n")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::nucleotide::NucleotideCall;

    #[test]
    fn test_preamble() {
        let mut out = Vec::new();
        let paths = vec![PathBuf::from("/data/a.bam"), PathBuf::from("b.cram")];
        write_preamble(&mut out, &paths).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "#Files\t/data/a.bam\tb.cram\n");
    }

    #[test]
    fn test_contig_block() {
        let contig = Contig::new("chrM", 3);
        let mut matrix = DepthMatrix::new(3, 2);
        matrix.record(0, 0, NucleotideCall::A);
        matrix.record(0, 1, NucleotideCall::N);
        matrix.record(2, 1, NucleotideCall::Other);
        matrix.record(2, 1, NucleotideCall::Other);

        let mut out = Vec::new();
        write_contig(&mut out, &contig, &matrix).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "region=chrM\tlen=3\n\
             1,0,0,0,0,0\t0,0,0,0,1,0\n\
             0,0,0,0,0,0\t0,0,0,0,0,0\n\
             0,0,0,0,0,0\t0,0,0,0,0,2\n"
        );
    }

    #[test]
    fn test_empty_contig_has_only_header() {
        let mut out = Vec::new();
        write_contig(&mut out, &Contig::new("empty", 0), &DepthMatrix::new(0, 1)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "region=empty\tlen=0\n");
    }
}
