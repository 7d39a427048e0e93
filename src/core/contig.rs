/// A single contig/sequence in a reference genome
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contig {
    /// Sequence name (SN tag in SAM)
    pub name: String,

    /// Sequence length (LN tag in SAM)
    pub length: u64,
}

impl Contig {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    /// Check if a zero-based reference position falls inside this contig
    #[must_use]
    pub fn contains(&self, position: u64) -> bool {
        position < self.length
    }
}

/// Describe the first difference between two ordered target lists.
///
/// Returns `None` when both lists agree in name, length and order.
#[must_use]
pub fn describe_target_difference(expected: &[Contig], actual: &[Contig]) -> Option<String> {
    for (i, (lhs, rhs)) in expected.iter().zip(actual).enumerate() {
        if lhs.name != rhs.name {
            return Some(format!(
                "contig #{i} is '{}', expected '{}'",
                rhs.name, lhs.name
            ));
        }
        if lhs.length != rhs.length {
            return Some(format!(
                "contig '{}' has length {}, expected {}",
                rhs.name, rhs.length, lhs.length
            ));
        }
    }

    if expected.len() != actual.len() {
        return Some(format!(
            "{} contigs, expected {}",
            actual.len(),
            expected.len()
        ));
    }

    None
}
