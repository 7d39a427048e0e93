//! CIGAR operations in the shape the depth engine consumes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CigarError {
    #[error("Invalid CIGAR operation '{0}'")]
    InvalidKind(char),

    #[error("CIGAR operation '{0}' has no length")]
    MissingLength(char),

    #[error("Invalid CIGAR length: {0}")]
    InvalidLength(String),

    #[error("CIGAR ends with a dangling length: {0}")]
    Dangling(String),
}

/// Kind of a single CIGAR operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarKind {
    /// `M`
    Match,
    /// `I`
    Insertion,
    /// `D`
    Deletion,
    /// `N`
    Skip,
    /// `S`
    SoftClip,
    /// `H`
    HardClip,
    /// `P`
    Pad,
    /// `=`
    SequenceMatch,
    /// `X`
    SequenceMismatch,
}

impl CigarKind {
    #[must_use]
    pub fn consumes_reference(self) -> bool {
        matches!(
            self,
            CigarKind::Match
                | CigarKind::Deletion
                | CigarKind::Skip
                | CigarKind::SequenceMatch
                | CigarKind::SequenceMismatch
        )
    }

    #[must_use]
    pub fn consumes_query(self) -> bool {
        matches!(
            self,
            CigarKind::Match
                | CigarKind::Insertion
                | CigarKind::SoftClip
                | CigarKind::SequenceMatch
                | CigarKind::SequenceMismatch
        )
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            CigarKind::Match => 'M',
            CigarKind::Insertion => 'I',
            CigarKind::Deletion => 'D',
            CigarKind::Skip => 'N',
            CigarKind::SoftClip => 'S',
            CigarKind::HardClip => 'H',
            CigarKind::Pad => 'P',
            CigarKind::SequenceMatch => '=',
            CigarKind::SequenceMismatch => 'X',
        }
    }
}

impl TryFrom<char> for CigarKind {
    type Error = CigarError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            'M' => Ok(CigarKind::Match),
            'I' => Ok(CigarKind::Insertion),
            'D' => Ok(CigarKind::Deletion),
            'N' => Ok(CigarKind::Skip),
            'S' => Ok(CigarKind::SoftClip),
            'H' => Ok(CigarKind::HardClip),
            'P' => Ok(CigarKind::Pad),
            '=' => Ok(CigarKind::SequenceMatch),
            'X' => Ok(CigarKind::SequenceMismatch),
            other => Err(CigarError::InvalidKind(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    pub kind: CigarKind,
    pub len: usize,
}

impl CigarOp {
    #[must_use]
    pub fn new(kind: CigarKind, len: usize) -> Self {
        Self { kind, len }
    }
}

/// An ordered list of CIGAR operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cigar(Vec<CigarOp>);

impl Cigar {
    #[must_use]
    pub fn ops(&self) -> &[CigarOp] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<CigarOp>> for Cigar {
    fn from(ops: Vec<CigarOp>) -> Self {
        Self(ops)
    }
}

impl FromIterator<CigarOp> for Cigar {
    fn from_iter<I: IntoIterator<Item = CigarOp>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for Cigar {
    type Err = CigarError;

    /// Parse SAM CIGAR text such as `5M2D5M`. `*` is the empty CIGAR.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Self::default());
        }

        let mut ops = Vec::new();
        let mut digits = String::new();

        for c in s.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }

            let kind = CigarKind::try_from(c)?;
            if digits.is_empty() {
                return Err(CigarError::MissingLength(c));
            }
            let len: usize = digits
                .parse()
                .map_err(|_| CigarError::InvalidLength(digits.clone()))?;
            ops.push(CigarOp::new(kind, len));
            digits.clear();
        }

        if !digits.is_empty() {
            return Err(CigarError::Dangling(digits));
        }

        Ok(Self(ops))
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("*");
        }
        for op in &self.0 {
            write!(f, "{}{}", op.len, op.kind.symbol())?;
        }
        Ok(())
    }
}
