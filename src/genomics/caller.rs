use thiserror::Error;
use tracing::debug;

use crate::genomics::{
    call_deletion, call_insertion, call_snv, to_global, AlignmentShape, Cigar, CoordinateError,
    IndelKind, SequenceRecord, Variant,
};

/// Internal consistency failures: the classified shape does not agree with
/// the sequences it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Indel allele does not span the anchor base plus the indel.
    #[error("{kind} allele has {observed} bases, expected {expected}")]
    AlleleLength {
        /// Deletion or insertion.
        kind: IndelKind,
        /// `indel_len + 1`.
        expected: usize,
        /// Bases actually available.
        observed: usize,
    },

    /// Matched block extends past the end of its sequence.
    #[error("{sequence} block of {length} bases at offset {start} exceeds sequence length {sequence_len}")]
    BlockOutOfBounds {
        /// Which sequence (`target` or `query`).
        sequence: &'static str,
        /// Block start.
        start: usize,
        /// Block length.
        length: usize,
        /// Length of the sequence.
        sequence_len: usize,
    },
}

/// Fatal errors that end a calling run.
///
/// Ambiguous alignments are not errors; they surface as no-call records.
#[derive(Debug, Error)]
pub enum CallError {
    /// Target identifier does not encode its global offset.
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    /// Classified operands disagree with the sequence data.
    #[error("internal invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Interpret one alignment of `query` against `target`.
///
/// The encoding is tokenized and classified; recognized shapes dispatch to
/// the SNV or indel callers, anything else (including encodings that do not
/// tokenize) becomes a single `inscrutablecigar` no-call.
pub fn make_call(
    target: &SequenceRecord,
    query: &SequenceRecord,
    cigar: &str,
    ksize: usize,
) -> Result<Vec<Variant>, CallError> {
    let shape = match cigar.parse::<Cigar>() {
        Ok(tokens) => AlignmentShape::classify(&tokens),
        Err(err) => {
            debug!(cigar, error = %err, "alignment encoding did not tokenize");
            AlignmentShape::Inscrutable
        }
    };
    debug!(target_id = %target.name, query_id = %query.name, cigar, ?shape, "classified alignment");
    if let Some(trailing) = shape.trailing_match() {
        debug!(cigar, trailing, "ignoring short trailing match");
    }

    match shape {
        AlignmentShape::Substitution { offset, length, .. } => {
            call_snv(target, query, offset, length, ksize)
        }
        AlignmentShape::Indel {
            kind: IndelKind::Deletion,
            offset,
            left_match,
            indel_len,
            ..
        } => call_deletion(target, offset, left_match, indel_len),
        AlignmentShape::Indel {
            kind: IndelKind::Insertion,
            offset,
            left_match,
            indel_len,
            ..
        } => call_insertion(target, query, offset, left_match, indel_len),
        AlignmentShape::Inscrutable => {
            let (seqid, position) = to_global(0, &target.name)?;
            Ok(vec![Variant::inscrutable(
                seqid,
                position,
                &query.name,
                &query.sequence,
                cigar,
            )])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::NoCallReason;

    fn target() -> SequenceRecord {
        SequenceRecord::new("chr1_0-8", b"AAAACCCC".to_vec())
    }

    #[test]
    fn substitution_example() {
        let query = SequenceRecord::new("contig1", b"AAAATCCC".to_vec());
        let calls = make_call(&target(), &query, "0D8M0D", 3).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].vcf(), "chr1\t5\t.\tC\tT\t.\tPASS\tVW=AATCC");
    }

    #[test]
    fn short_trailing_match_is_ignored() {
        let query = SequenceRecord::new("contig1", b"AAAATCCC".to_vec());
        let bare = make_call(&target(), &query, "0D8M0D", 3).unwrap();
        let trailing = make_call(&target(), &query, "0D8M0D5M", 3).unwrap();
        assert_eq!(bare, trailing);
    }

    #[test]
    fn untokenizable_encoding_is_inscrutable() {
        let query = SequenceRecord::new("contig1", b"AAAATCCC".to_vec());
        let calls = make_call(&target(), &query, "8=", 3).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].nocall_reason(), Some(NoCallReason::InscrutableCigar));
        assert_eq!(calls[0].cigar(), Some("8="));
        assert_eq!(calls[0].position(), 0);
    }

    #[test]
    fn malformed_target_id_fails_even_for_nocalls() {
        let target = SequenceRecord::new("chr1", b"AAAACCCC".to_vec());
        let query = SequenceRecord::new("contig1", b"AAAACCCC".to_vec());
        for cigar in ["0D8M0D", "3S5M"] {
            let err = make_call(&target, &query, cigar, 3).unwrap_err();
            assert!(matches!(err, CallError::Coordinate(_)));
        }
    }
}
