//! Alignment interpretation: from contig-versus-target alignments to typed
//! variant records.
//!
//! Leaves first: sequence and alignment-encoding types, the coordinate
//! mapper, the variant model, the SNV and indel callers, the shape
//! classifier with its dispatch, and the pairwise driver that ties an
//! aligner to all of them.

mod aligner;
mod caller;
mod coordinates;
mod driver;
mod indel;
mod io;
mod shape;
mod snv;
mod types;
mod variant;
mod vcf;

pub use aligner::{encode_alignment, AffineAligner, PairwiseAligner};
pub use caller::{make_call, CallError, InvariantViolation};
pub use coordinates::{to_global, CoordinateError, SubsequenceId};
pub use driver::{AlignedPair, Alignments, CallStats, Calls, PairwiseCallDriver};
pub use indel::{call_deletion, call_insertion};
pub use io::{parse_fasta, read_fasta};
pub use shape::{AlignmentShape, IndelKind, MAX_TRAILING_MATCH};
pub use snv::{call_snv, evidence_window};
pub use types::{Cigar, CigarOp, CigarOpKind, CigarParseError, SequenceRecord};
pub use variant::{NoCallReason, Variant, VariantKind, NO_CALL_ALLELE};
pub use vcf::{render_vcf, write_header, write_record, write_vcf};
