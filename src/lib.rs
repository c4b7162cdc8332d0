//! # Contig variant calling
//!
//! Interprets alignments of assembled contigs ("queries") against
//! reference-derived subsequences ("targets") and reports the variants they
//! imply, as one stage of a reference-free variant discovery workflow.
//!
//! ## Core Algorithm
//!
//! 1. **Align**: each query is aligned end to end against part of each
//!    target, producing an encoding such as `3D40M1I12M2D`.
//! 2. **Classify**: the encoding is tokenized and matched against five
//!    recognized shapes (one matched block, or one clean indel, each with an
//!    optional short trailing match). Everything else is declined.
//! 3. **Call**: substitution blocks yield one SNV per mismatch with a k-mer
//!    evidence window; indel shapes yield one anchored indel.
//! 4. **Locate**: target identifiers `<seqId>_<start>-<end>` translate
//!    local offsets into global coordinates.
//!
//! Declined or identical alignments produce no-call records instead of
//! errors. Malformed target identifiers and allele inconsistencies are fatal.
//!
//! ## Usage Example
//!
//! ```
//! use contigcall::genomics::{make_call, SequenceRecord};
//!
//! let target = SequenceRecord::new("chr1_0-8", b"AAAACCCC".to_vec());
//! let query = SequenceRecord::new("contig1", b"AAAATCCC".to_vec());
//! let calls = make_call(&target, &query, "0D8M0D", 3)?;
//! assert_eq!(calls[0].vcf(), "chr1\t5\t.\tC\tT\t.\tPASS\tVW=AATCC");
//! # Ok::<(), contigcall::genomics::CallError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod genomics;

pub use config::{CallConfig, ConfigError, ScoringParams};
pub use genomics::{CallError, Calls, PairwiseCallDriver, SequenceRecord, Variant};

use genomics::AffineAligner;

/// Lazily call variants for every (target, query) pair using the built-in
/// affine-gap aligner.
pub fn call(
    targets: Vec<SequenceRecord>,
    queries: Vec<SequenceRecord>,
    config: &CallConfig,
) -> Result<Calls<AffineAligner>, ConfigError> {
    config.validate()?;
    let aligner = AffineAligner::new(config.scoring);
    Ok(PairwiseCallDriver::new(targets, queries, aligner, config.ksize).calls())
}
