use std::ops::Range;

use tracing::warn;

use crate::genomics::{to_global, CallError, InvariantViolation, SequenceRecord, Variant};

/// Query interval containing every k-mer that overlaps block index `index`.
///
/// Near the block edges fewer than `ksize` k-mers overlap the index and the
/// window is clipped to `[0, length)`.
pub fn evidence_window(index: usize, ksize: usize, length: usize) -> Range<usize> {
    let start = (index + 1).saturating_sub(ksize);
    let end = index.saturating_add(ksize).min(length);
    start.min(end)..end
}

/// Call substitutions between `target[offset..offset+length]` and the query
/// prefix of the same length.
///
/// Emits one SNV per mismatching index, or a single `perfectmatch` no-call
/// when the blocks agree. Bases are compared as supplied and uppercased only
/// on output.
pub fn call_snv(
    target: &SequenceRecord,
    query: &SequenceRecord,
    offset: usize,
    length: usize,
    ksize: usize,
) -> Result<Vec<Variant>, CallError> {
    let target_block = block(&target.sequence, offset, length, "target")?;
    let query_block = block(&query.sequence, 0, length, "query")?;

    let diffs: Vec<usize> = (0..length)
        .filter(|&i| target_block[i] != query_block[i])
        .collect();

    if diffs.is_empty() {
        let (seqid, position) = to_global(offset as u64, &target.name)?;
        return Ok(vec![Variant::perfect_match(
            seqid,
            position,
            &query.name,
            query_block,
        )]);
    }

    diffs
        .into_iter()
        .map(|i| -> Result<Variant, CallError> {
            let (refr, alt) = (target_block[i], query_block[i]);
            if refr.eq_ignore_ascii_case(&alt) {
                warn!(
                    target_id = %target.name,
                    query_id = %query.name,
                    index = offset + i,
                    "substitution differs only in letter case"
                );
            }
            let window = &query_block[evidence_window(i, ksize, length)];
            let (seqid, position) = to_global((offset + i) as u64, &target.name)?;
            Ok(Variant::snv(seqid, position, refr, alt, window))
        })
        .collect()
}

fn block<'a>(
    sequence: &'a [u8],
    start: usize,
    length: usize,
    label: &'static str,
) -> Result<&'a [u8], InvariantViolation> {
    start
        .checked_add(length)
        .and_then(|end| sequence.get(start..end))
        .ok_or(InvariantViolation::BlockOutOfBounds {
            sequence: label,
            start,
            length,
            sequence_len: sequence.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::NoCallReason;

    fn records(target: &str, query: &str) -> (SequenceRecord, SequenceRecord) {
        (
            SequenceRecord::new("chr1_0-100", target.as_bytes().to_vec()),
            SequenceRecord::new("contig1", query.as_bytes().to_vec()),
        )
    }

    #[test]
    fn single_mismatch_yields_one_snv() {
        let (target, query) = records("AAAACCCC", "AAAATCCC");
        let calls = call_snv(&target, &query, 0, 8, 3).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].position(), 4);
        assert_eq!(calls[0].refr(), "C");
        assert_eq!(calls[0].alt(), "T");
        assert_eq!(calls[0].window(), Some("AATCC"));
    }

    #[test]
    fn agreeing_blocks_yield_perfect_match() {
        let (target, query) = records("GGAAAACCCCGG", "AAAACCCC");
        let calls = call_snv(&target, &query, 2, 8, 3).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].nocall_reason(), Some(NoCallReason::PerfectMatch));
        assert_eq!(calls[0].position(), 2);
        assert_eq!(
            calls[0].info_field(),
            "NC=perfectmatch;QN=contig1;QS=AAAACCCC"
        );
    }

    #[test]
    fn adjacent_mismatches_are_called_separately() {
        let (target, query) = records("ACGTACGTAC", "ACGAAAGTAC");
        let calls = call_snv(&target, &query, 0, 10, 4).unwrap();
        let summary: Vec<String> = calls.iter().map(ToString::to_string).collect();
        assert_eq!(summary, vec!["chr1:3:T->A", "chr1:5:C->A"]);
    }

    #[test]
    fn lowercase_bases_are_uppercased_on_output() {
        let (target, query) = records("acgt", "acct");
        let calls = call_snv(&target, &query, 0, 4, 2).unwrap();
        assert_eq!(calls[0].refr(), "G");
        assert_eq!(calls[0].alt(), "C");
        assert_eq!(calls[0].window(), Some("cct"));
    }

    #[test]
    fn case_only_differences_are_still_called() {
        let (target, query) = records("acgt", "ACGT");
        let calls = call_snv(&target, &query, 0, 4, 2).unwrap();
        let summary: Vec<String> = calls.iter().map(ToString::to_string).collect();
        assert_eq!(
            summary,
            vec!["chr1:0:A->A", "chr1:1:C->C", "chr1:2:G->G", "chr1:3:T->T"]
        );
        assert_eq!(calls[0].window(), Some("AC"));
        assert!(calls.iter().all(|call| !call.is_nocall()));
    }

    #[test]
    fn window_is_clipped_at_block_edges() {
        assert_eq!(evidence_window(0, 5, 20), 0..5);
        assert_eq!(evidence_window(19, 5, 20), 15..20);
        assert_eq!(evidence_window(10, 5, 20), 6..15);
        assert_eq!(evidence_window(3, 0, 20), 3..3);
    }

    #[test]
    fn block_past_sequence_end_is_an_invariant_violation() {
        let (target, query) = records("ACGT", "ACGT");
        let err = call_snv(&target, &query, 2, 4, 3).unwrap_err();
        assert!(matches!(
            err,
            CallError::Invariant(InvariantViolation::BlockOutOfBounds {
                sequence: "target",
                ..
            })
        ));
    }
}
