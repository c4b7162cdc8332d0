use std::fmt;

use crate::genomics::{Cigar, CigarOp, CigarOpKind};

/// Pattern for a token of the given kind, binding its length.
macro_rules! op {
    ($kind:ident, $len:pat) => {
        CigarOp {
            kind: $kind,
            len: $len,
        }
    };
}

/// Longest trailing match tolerated after the closing target gap.
pub const MAX_TRAILING_MATCH: u32 = 5;

/// Direction of a single indel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndelKind {
    /// Target carries bases absent from the query.
    Deletion,
    /// Query carries bases absent from the target.
    Insertion,
}

impl fmt::Display for IndelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Deletion => "deletion",
            Self::Insertion => "insertion",
        })
    }
}

/// Recognized form of an alignment encoding.
///
/// Only the shapes produced by a contig differing from its target by one
/// clean substitution block or one clean indel are recognized; everything
/// else is [`AlignmentShape::Inscrutable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentShape {
    /// `D(a) M(b) D(c)`, optionally followed by a short `M(d)`.
    Substitution {
        /// Target offset of the matched block.
        offset: usize,
        /// Length of the matched block.
        length: usize,
        /// Tolerated trailing match, if present.
        trailing_match: Option<u32>,
    },
    /// `D(a) M(b) I|D(c) M(d) D(e)`, optionally followed by a short `M(f)`.
    Indel {
        /// Deletion or insertion.
        kind: IndelKind,
        /// Target offset of the left matched block.
        offset: usize,
        /// Length of the matched block left of the indel.
        left_match: usize,
        /// Number of inserted or deleted bases.
        indel_len: usize,
        /// Tolerated trailing match, if present.
        trailing_match: Option<u32>,
    },
    /// Any other shape, including an over-long trailing match.
    Inscrutable,
}

impl AlignmentShape {
    /// Classify a token list against the recognized shapes in priority order.
    pub fn classify(cigar: &Cigar) -> Self {
        use CigarOpKind::{Deletion as D, Match as M};

        match *cigar.ops() {
            [op!(D, a), op!(M, b), op!(D, _)] => Self::Substitution {
                offset: a as usize,
                length: b as usize,
                trailing_match: None,
            },
            [op!(D, a), op!(M, b), op!(D, _), op!(M, d)] if d <= MAX_TRAILING_MATCH => {
                Self::Substitution {
                    offset: a as usize,
                    length: b as usize,
                    trailing_match: Some(d),
                }
            }
            [op!(D, a), op!(M, b), indel, op!(M, _), op!(D, _)] => {
                Self::indel(a, b, indel, None)
            }
            [op!(D, a), op!(M, b), indel, op!(M, _), op!(D, _), op!(M, f)]
                if f <= MAX_TRAILING_MATCH =>
            {
                Self::indel(a, b, indel, Some(f))
            }
            _ => Self::Inscrutable,
        }
    }

    fn indel(offset: u32, left_match: u32, indel: CigarOp, trailing_match: Option<u32>) -> Self {
        let kind = match indel.kind {
            CigarOpKind::Deletion => IndelKind::Deletion,
            CigarOpKind::Insertion => IndelKind::Insertion,
            _ => return Self::Inscrutable,
        };
        Self::Indel {
            kind,
            offset: offset as usize,
            left_match: left_match as usize,
            indel_len: indel.len as usize,
            trailing_match,
        }
    }

    /// Length of the tolerated trailing match, if the shape carried one.
    pub fn trailing_match(&self) -> Option<u32> {
        match *self {
            Self::Substitution { trailing_match, .. } | Self::Indel { trailing_match, .. } => {
                trailing_match
            }
            Self::Inscrutable => None,
        }
    }
}
