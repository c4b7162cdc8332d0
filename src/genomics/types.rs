use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// Simple CIGAR operation kinds describing how a query aligns to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarOpKind {
    /// Consuming match/mismatch.
    Match,
    /// Insertion relative to the target (query-only consumption).
    Insertion,
    /// Deletion relative to the target (target-only consumption).
    Deletion,
    /// Soft clipping (sequence present in query only).
    SoftClip,
    /// Hard clipping (trimmed sequence not present in query).
    HardClip,
}

impl CigarOpKind {
    /// Parse a single CIGAR operation character.
    pub fn from_char(op: char) -> Option<Self> {
        match op {
            'M' => Some(Self::Match),
            'I' => Some(Self::Insertion),
            'D' => Some(Self::Deletion),
            'S' => Some(Self::SoftClip),
            'H' => Some(Self::HardClip),
            _ => None,
        }
    }

    /// Character used for this operation in an encoded alignment.
    pub fn as_char(self) -> char {
        match self {
            Self::Match => 'M',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
            Self::SoftClip => 'S',
            Self::HardClip => 'H',
        }
    }
}

/// CIGAR operation with length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    /// Operation kind.
    pub kind: CigarOpKind,
    /// Number of bases affected by the operation.
    pub len: u32,
}

impl CigarOp {
    /// Construct a new CIGAR operation.
    pub fn new(kind: CigarOpKind, len: u32) -> Self {
        Self { kind, len }
    }
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len, self.kind.as_char())
    }
}

/// Errors raised while tokenizing an encoded alignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CigarParseError {
    /// Encoding contained no tokens.
    #[error("empty alignment encoding")]
    Empty,

    /// An operation character appeared without a preceding length.
    #[error("operation '{op}' at offset {offset} has no length")]
    MissingLength {
        /// Operation character.
        op: char,
        /// Byte offset within the encoding.
        offset: usize,
    },

    /// Character that is neither a digit nor a supported operation.
    #[error("unsupported operation '{op}' at offset {offset}")]
    UnsupportedOp {
        /// Offending character.
        op: char,
        /// Byte offset within the encoding.
        offset: usize,
    },

    /// Length does not fit in 32 bits.
    #[error("operation length '{digits}' is out of range")]
    LengthOverflow {
        /// Digits as they appeared in the encoding.
        digits: String,
    },

    /// Encoding ended with a length but no operation.
    #[error("dangling length '{digits}' at end of encoding")]
    DanglingLength {
        /// Trailing digits.
        digits: String,
    },
}

/// Ordered list of `(length, operation)` tokens parsed from an encoding such
/// as `0D8M0D`.
///
/// Runs of the same operation are kept exactly as written; `2D3D` tokenizes
/// to two deletions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cigar(Vec<CigarOp>);

impl Cigar {
    /// Wrap an existing token list.
    pub fn new(ops: Vec<CigarOp>) -> Self {
        Self(ops)
    }

    /// Tokens in alignment order.
    pub fn ops(&self) -> &[CigarOp] {
        &self.0
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no tokens are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Cigar {
    type Err = CigarParseError;

    fn from_str(encoding: &str) -> Result<Self, Self::Err> {
        let mut ops = Vec::new();
        let mut digits_start = None;

        for (offset, ch) in encoding.char_indices() {
            if ch.is_ascii_digit() {
                digits_start.get_or_insert(offset);
                continue;
            }
            let kind = CigarOpKind::from_char(ch)
                .ok_or(CigarParseError::UnsupportedOp { op: ch, offset })?;
            let start = digits_start
                .take()
                .ok_or(CigarParseError::MissingLength { op: ch, offset })?;
            let digits = &encoding[start..offset];
            let len = digits
                .parse::<u32>()
                .map_err(|_| CigarParseError::LengthOverflow {
                    digits: digits.to_string(),
                })?;
            ops.push(CigarOp::new(kind, len));
        }

        if let Some(start) = digits_start {
            return Err(CigarParseError::DanglingLength {
                digits: encoding[start..].to_string(),
            });
        }
        if ops.is_empty() {
            return Err(CigarParseError::Empty);
        }
        Ok(Self(ops))
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.0 {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Named nucleotide sequence (FASTA record, target subsequence or contig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Record identifier.
    pub name: Arc<str>,
    /// Bases exactly as supplied (case preserved).
    pub sequence: Arc<[u8]>,
}

impl SequenceRecord {
    /// Construct a new record.
    pub fn new(name: impl Into<Arc<str>>, sequence: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    /// Sequence length in bases.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true for an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_recognized_encoding() {
        let cigar: Cigar = "3D12M1I4M0D".parse().unwrap();
        assert_eq!(
            cigar.ops(),
            &[
                CigarOp::new(CigarOpKind::Deletion, 3),
                CigarOp::new(CigarOpKind::Match, 12),
                CigarOp::new(CigarOpKind::Insertion, 1),
                CigarOp::new(CigarOpKind::Match, 4),
                CigarOp::new(CigarOpKind::Deletion, 0),
            ]
        );
        assert_eq!(cigar.to_string(), "3D12M1I4M0D");
    }

    #[test]
    fn clip_tokens_are_parsed() {
        let cigar: Cigar = "5S20M".parse().unwrap();
        assert_eq!(cigar.ops()[0].kind, CigarOpKind::SoftClip);
    }

    #[test]
    fn malformed_encodings_are_rejected() {
        assert_eq!("".parse::<Cigar>(), Err(CigarParseError::Empty));
        assert_eq!(
            "M5".parse::<Cigar>(),
            Err(CigarParseError::MissingLength { op: 'M', offset: 0 })
        );
        assert_eq!(
            "5X".parse::<Cigar>(),
            Err(CigarParseError::UnsupportedOp { op: 'X', offset: 1 })
        );
        assert_eq!(
            "5M3".parse::<Cigar>(),
            Err(CigarParseError::DanglingLength {
                digits: "3".to_string()
            })
        );
        assert!(matches!(
            "99999999999M".parse::<Cigar>(),
            Err(CigarParseError::LengthOverflow { .. })
        ));
    }

    #[test]
    fn sequence_record_accessors() {
        let record = SequenceRecord::new("contig1", b"ACGT".to_vec());
        assert_eq!(record.len(), 4);
        assert!(!record.is_empty());
        assert_eq!(&record.sequence[2..], b"GT");
    }
}
