use crate::genomics::{to_global, CallError, IndelKind, InvariantViolation, SequenceRecord, Variant};

/// Call a deletion of `indel_len` target bases following the left matched
/// block. REF spans the anchor base plus the deleted bases; ALT is the anchor.
pub fn call_deletion(
    target: &SequenceRecord,
    offset: usize,
    left_match: usize,
    indel_len: usize,
) -> Result<Vec<Variant>, CallError> {
    let anchor = offset + left_match;
    let refr = anchored_allele(&target.sequence, anchor, indel_len, IndelKind::Deletion)?;
    let alt = &refr[..1];
    let (seqid, position) = anchor_position(target, anchor)?;
    Ok(vec![Variant::indel(seqid, position, refr, alt)])
}

/// Call an insertion of `indel_len` query bases following the left matched
/// block. ALT spans the anchor base plus the inserted bases; REF is the anchor.
pub fn call_insertion(
    target: &SequenceRecord,
    query: &SequenceRecord,
    offset: usize,
    left_match: usize,
    indel_len: usize,
) -> Result<Vec<Variant>, CallError> {
    let insertion = anchored_allele(&query.sequence, left_match, indel_len, IndelKind::Insertion)?;
    let refr = &insertion[..1];
    let (seqid, position) = anchor_position(target, offset + left_match)?;
    Ok(vec![Variant::indel(seqid, position, refr, insertion)])
}

/// Slice `[anchor - 1, anchor + indel_len)` and require exactly
/// `indel_len + 1` bases.
fn anchored_allele(
    sequence: &[u8],
    anchor: usize,
    indel_len: usize,
    kind: IndelKind,
) -> Result<&[u8], InvariantViolation> {
    let expected = indel_len + 1;
    let allele = anchor
        .checked_sub(1)
        .and_then(|start| sequence.get(start..(anchor + indel_len).min(sequence.len())))
        .unwrap_or_default();

    if allele.len() != expected {
        return Err(InvariantViolation::AlleleLength {
            kind,
            expected,
            observed: allele.len(),
        });
    }
    Ok(allele)
}

/// Global position of the anchor base preceding the indel.
fn anchor_position(target: &SequenceRecord, anchor: usize) -> Result<(String, u64), CallError> {
    let (seqid, global) = to_global(anchor as u64, &target.name)?;
    Ok((seqid, global - 1))
}
