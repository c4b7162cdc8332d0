//! Run configuration: alignment scoring and k-mer size.
//!
//! Penalties are stored as positive magnitudes, the way they are given on
//! the command line; the aligner negates them internally.

use thiserror::Error;

/// Default k-mer size used for evidence windows.
pub const DEFAULT_KSIZE: usize = 31;

/// Errors raised by invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// k-mer size must be at least 1.
    #[error("k-mer size must be > 0")]
    ZeroKsize,

    /// Match score must reward matches.
    #[error("match score must be > 0 (got {0})")]
    NonPositiveMatch(i32),

    /// A penalty was negative.
    #[error("{name} penalty must be >= 0 (got {value})")]
    NegativePenalty {
        /// Parameter name.
        name: &'static str,
        /// Value supplied.
        value: i32,
    },
}

/// Affine-gap scoring for the pairwise aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringParams {
    /// Score for a matching base pair.
    pub match_score: i32,
    /// Penalty for a mismatching base pair.
    pub mismatch: i32,
    /// Penalty for opening a gap.
    pub gap_open: i32,
    /// Penalty for each gap position.
    pub gap_extend: i32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch: 2,
            gap_open: 5,
            gap_extend: 0,
        }
    }
}

impl ScoringParams {
    /// Construct scoring from match score and penalties.
    pub fn new(match_score: i32, mismatch: i32, gap_open: i32, gap_extend: i32) -> Self {
        Self {
            match_score,
            mismatch,
            gap_open,
            gap_extend,
        }
    }

    /// Check signs of all parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.match_score <= 0 {
            return Err(ConfigError::NonPositiveMatch(self.match_score));
        }
        for (name, value) in [
            ("mismatch", self.mismatch),
            ("gap open", self.gap_open),
            ("gap extend", self.gap_extend),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativePenalty { name, value });
            }
        }
        Ok(())
    }
}

/// Parameters for a calling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallConfig {
    /// Aligner scoring.
    pub scoring: ScoringParams,
    /// k-mer size for evidence windows.
    pub ksize: usize,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringParams::default(),
            ksize: DEFAULT_KSIZE,
        }
    }
}

impl CallConfig {
    /// Set the aligner scoring.
    pub fn with_scoring(mut self, scoring: ScoringParams) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the k-mer size.
    pub fn with_ksize(mut self, ksize: usize) -> Self {
        self.ksize = ksize;
        self
    }

    /// Validate all parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ksize == 0 {
            return Err(ConfigError::ZeroKsize);
        }
        self.scoring.validate()
    }
}
