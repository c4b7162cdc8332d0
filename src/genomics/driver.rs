use std::iter::FusedIterator;
use std::vec;

use tracing::{debug, error};

use crate::genomics::{make_call, CallError, PairwiseAligner, SequenceRecord, Variant};

/// One (target, query) pair together with its alignment encoding.
#[derive(Debug, Clone)]
pub struct AlignedPair {
    /// Reference-derived subsequence.
    pub target: SequenceRecord,
    /// Assembled contig.
    pub query: SequenceRecord,
    /// Encoding produced by the aligner.
    pub cigar: String,
}

/// Drives alignment and calling over every (target, query) pair.
///
/// Targets are visited in ascending identifier order; for each target the
/// queries are visited longest first, keeping input order among queries of
/// equal length.
#[derive(Debug)]
pub struct PairwiseCallDriver<A> {
    targets: Vec<SequenceRecord>,
    queries: Vec<SequenceRecord>,
    aligner: A,
    ksize: usize,
}

impl<A: PairwiseAligner> PairwiseCallDriver<A> {
    /// Create a driver; inputs are put into canonical order immediately.
    pub fn new(
        mut targets: Vec<SequenceRecord>,
        mut queries: Vec<SequenceRecord>,
        aligner: A,
        ksize: usize,
    ) -> Self {
        targets.sort_by(|a, b| a.name.cmp(&b.name));
        queries.sort_by(|a, b| b.len().cmp(&a.len()));
        Self {
            targets,
            queries,
            aligner,
            ksize,
        }
    }

    /// Targets in visiting order.
    pub fn targets(&self) -> &[SequenceRecord] {
        &self.targets
    }

    /// Queries in visiting order.
    pub fn queries(&self) -> &[SequenceRecord] {
        &self.queries
    }

    /// Lazily align every pair without calling variants.
    pub fn alignments(self) -> Alignments<A> {
        Alignments {
            targets: self.targets,
            queries: self.queries,
            aligner: self.aligner,
            cursor: (0, 0),
        }
    }

    /// Lazily align and call every pair.
    pub fn calls(self) -> Calls<A> {
        let ksize = self.ksize;
        Calls {
            pairs: self.alignments(),
            ksize,
            pending: Vec::new().into_iter(),
            failed: false,
            stats: CallStats::default(),
        }
    }
}

/// Iterator over aligned pairs in canonical order.
///
/// Each call to `next` aligns exactly one pair.
#[derive(Debug)]
pub struct Alignments<A> {
    targets: Vec<SequenceRecord>,
    queries: Vec<SequenceRecord>,
    aligner: A,
    cursor: (usize, usize),
}

impl<A: PairwiseAligner> Iterator for Alignments<A> {
    type Item = AlignedPair;

    fn next(&mut self) -> Option<Self::Item> {
        let (t, q) = self.cursor;
        let target = self.targets.get(t)?.clone();
        let query = self.queries.get(q)?.clone();

        self.cursor = if q + 1 == self.queries.len() {
            (t + 1, 0)
        } else {
            (t, q + 1)
        };

        let cigar = self.aligner.align(&target.sequence, &query.sequence);
        debug!(target_id = %target.name, query_id = %query.name, %cigar, "aligned pair");
        Some(AlignedPair {
            target,
            query,
            cigar,
        })
    }
}

impl<A: PairwiseAligner> FusedIterator for Alignments<A> {}

/// Running totals for a calling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallStats {
    /// Pairs aligned and classified.
    pub pairs: usize,
    /// SNV and indel records emitted.
    pub variants: usize,
    /// No-call records emitted.
    pub nocalls: usize,
}

/// Lazy stream of variant records.
///
/// A fatal [`CallError`] is yielded once and ends the stream.
#[derive(Debug)]
pub struct Calls<A> {
    pairs: Alignments<A>,
    ksize: usize,
    pending: vec::IntoIter<Variant>,
    failed: bool,
    stats: CallStats,
}

impl<A> Calls<A> {
    /// Totals for the records yielded so far.
    pub fn stats(&self) -> CallStats {
        self.stats
    }
}

impl<A: PairwiseAligner> Iterator for Calls<A> {
    type Item = Result<Variant, CallError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(variant) = self.pending.next() {
                if variant.is_nocall() {
                    self.stats.nocalls += 1;
                } else {
                    self.stats.variants += 1;
                }
                return Some(Ok(variant));
            }
            if self.failed {
                return None;
            }

            let pair = self.pairs.next()?;
            self.stats.pairs += 1;
            match make_call(&pair.target, &pair.query, &pair.cigar, self.ksize) {
                Ok(calls) => self.pending = calls.into_iter(),
                Err(err) => {
                    error!(
                        target_id = %pair.target.name,
                        query_id = %pair.query.name,
                        cigar = %pair.cigar,
                        error = %err,
                        "calling aborted"
                    );
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<A: PairwiseAligner> FusedIterator for Calls<A> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, seq: &str) -> SequenceRecord {
        SequenceRecord::new(name, seq.as_bytes().to_vec())
    }

    #[test]
    fn canonical_order_is_target_then_longest_query() {
        let targets = vec![record("chr2_0-4", "ACGT"), record("chr1_0-4", "ACGT")];
        let queries = vec![
            record("short", "AC"),
            record("long", "ACGT"),
            record("mid_a", "ACG"),
            record("mid_b", "ACG"),
        ];
        let aligner = |_: &[u8], _: &[u8]| "1M".to_string();
        let order: Vec<(String, String)> = PairwiseCallDriver::new(targets, queries, aligner, 3)
            .alignments()
            .map(|pair| (pair.target.name.to_string(), pair.query.name.to_string()))
            .collect();

        let expected = [
            ("chr1_0-4", "long"),
            ("chr1_0-4", "mid_a"),
            ("chr1_0-4", "mid_b"),
            ("chr1_0-4", "short"),
            ("chr2_0-4", "long"),
            ("chr2_0-4", "mid_a"),
            ("chr2_0-4", "mid_b"),
            ("chr2_0-4", "short"),
        ];
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(t, q)| (t.to_string(), q.to_string()))
            .collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn alignment_is_deferred_until_pulled() {
        let mut aligned = 0usize;
        {
            let aligner = |_: &[u8], _: &[u8]| {
                aligned += 1;
                "0D4M0D".to_string()
            };
            let targets = vec![record("chr1_0-4", "ACGT"), record("chr2_0-4", "ACGT")];
            let queries = vec![record("q", "ACGT")];
            let mut calls = PairwiseCallDriver::new(targets, queries, aligner, 3).calls();
            let first = calls.next().unwrap().unwrap();
            assert_eq!(first.seqid(), "chr1");
            assert_eq!(calls.stats().pairs, 1);
        }
        assert_eq!(aligned, 1);
    }

    #[test]
    fn error_ends_the_stream() {
        let targets = vec![record("bad", "ACGT"), record("chr9_0-4", "ACGT")];
        let queries = vec![record("q", "ACGT")];
        let aligner = |_: &[u8], _: &[u8]| "0D4M0D".to_string();
        let mut calls = PairwiseCallDriver::new(targets, queries, aligner, 3).calls();
        assert!(matches!(calls.next(), Some(Err(CallError::Coordinate(_)))));
        assert!(calls.next().is_none());
        assert!(calls.next().is_none());
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        let aligner = |_: &[u8], _: &[u8]| "0D4M0D".to_string();
        let mut calls =
            PairwiseCallDriver::new(vec![record("chr1_0-4", "ACGT")], Vec::new(), aligner, 3)
                .calls();
        assert!(calls.next().is_none());
        assert_eq!(calls.stats(), CallStats::default());
    }
}
