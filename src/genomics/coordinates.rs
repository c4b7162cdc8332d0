use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Target identifier could not be interpreted as `<seqId>_<start>-<end>`.
///
/// This signals a broken upstream extraction step and is never downgraded to
/// a no-call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to parse subsequence identifier '{id}': {reason}")]
pub struct CoordinateError {
    /// Identifier as supplied.
    pub id: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl CoordinateError {
    fn new(id: &str, reason: &'static str) -> Self {
        Self {
            id: id.to_string(),
            reason,
        }
    }
}

/// Parsed target identifier locating a subsequence on its parent sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsequenceId {
    /// Parent sequence identifier (e.g. chromosome name).
    pub seqid: String,
    /// 0-based global offset of the first subsequence base.
    pub start: u64,
    /// End coordinate as encoded in the identifier.
    pub end: u64,
}

impl SubsequenceId {
    /// Translate a subsequence-local offset into a global coordinate.
    ///
    /// Returns `None` when the result does not fit in a `u64`.
    pub fn to_global(&self, local: u64) -> Option<u64> {
        self.start.checked_add(local)
    }
}

impl FromStr for SubsequenceId {
    type Err = CoordinateError;

    /// Locates the first whitespace-delimited word containing an interval.
    /// Within that word `seqId` extends to the last `_<digits>-<digits>`;
    /// anything after the end coordinate is ignored.
    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let (seqid, start, end) = id
            .split_whitespace()
            .find_map(locate_interval)
            .ok_or_else(|| CoordinateError::new(id, "no '<seqId>_<start>-<end>' interval"))?;
        let start = start
            .parse()
            .map_err(|_| CoordinateError::new(id, "start coordinate overflows u64"))?;
        let end = end
            .parse()
            .map_err(|_| CoordinateError::new(id, "end coordinate overflows u64"))?;

        Ok(Self {
            seqid: seqid.to_string(),
            start,
            end,
        })
    }
}

impl fmt::Display for SubsequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}-{}", self.seqid, self.start, self.end)
    }
}

/// Split `word` into `(seqId, start, end)` digit runs, preferring the
/// rightmost `_` that opens an interval.
fn locate_interval(word: &str) -> Option<(&str, &str, &str)> {
    word.match_indices('_')
        .rev()
        .filter(|&(at, _)| at > 0)
        .find_map(|(at, _)| {
            let interval = &word[at + 1..];
            let start_len = digit_run(interval);
            if start_len == 0 {
                return None;
            }
            let rest = interval[start_len..].strip_prefix('-')?;
            let end_len = digit_run(rest);
            (end_len > 0).then_some((&word[..at], &interval[..start_len], &rest[..end_len]))
        })
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Map a local offset within the subsequence named `subseq_id` onto its
/// parent sequence, returning `(seqid, global_coordinate)`.
pub fn to_global(local: u64, subseq_id: &str) -> Result<(String, u64), CoordinateError> {
    let parsed: SubsequenceId = subseq_id.parse()?;
    let global = parsed
        .to_global(local)
        .ok_or_else(|| CoordinateError::new(subseq_id, "coordinate overflows u64"))?;
    Ok((parsed.seqid, global))
}
