use std::borrow::Cow;
use std::fmt;

/// Allele marker used for both REF and ALT of a no-call.
pub const NO_CALL_ALLELE: &str = ".";

/// Why no variant was called for an aligned pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoCallReason {
    /// Query block matches the target block exactly.
    PerfectMatch,
    /// Alignment shape is outside the recognized forms.
    InscrutableCigar,
}

impl NoCallReason {
    /// Reason code written under the `NC` INFO key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerfectMatch => "perfectmatch",
            Self::InscrutableCigar => "inscrutablecigar",
        }
    }
}

impl fmt::Display for NoCallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload of a [`Variant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantKind {
    /// Single-base substitution.
    Snv {
        /// Uppercased target base.
        refr: u8,
        /// Uppercased query base.
        alt: u8,
        /// Query interval containing every k-mer overlapping the substitution.
        window: String,
    },
    /// Insertion or deletion anchored on the preceding shared base.
    Indel {
        /// Reference allele, anchor base first.
        refr: String,
        /// Alternate allele, anchor base first.
        alt: String,
    },
    /// Nothing was called; diagnostics describe the query.
    NoCall {
        /// Reason code.
        reason: NoCallReason,
        /// Query identifier.
        query_name: String,
        /// Query bases (the matched block for perfect matches, the full
        /// contig otherwise).
        query_sequence: String,
        /// Raw alignment encoding, only kept for inscrutable alignments.
        cigar: Option<String>,
    },
}

/// Variant call (or no-call) on a global genome coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    seqid: String,
    position: u64,
    kind: VariantKind,
}

impl Variant {
    /// Single-base substitution at a 0-based global position.
    pub fn snv(seqid: impl Into<String>, position: u64, refr: u8, alt: u8, window: &[u8]) -> Self {
        Self {
            seqid: seqid.into(),
            position,
            kind: VariantKind::Snv {
                refr: refr.to_ascii_uppercase(),
                alt: alt.to_ascii_uppercase(),
                window: bases_to_string(window),
            },
        }
    }

    /// Indel whose position points at the shared anchor base.
    pub fn indel(seqid: impl Into<String>, position: u64, refr: &[u8], alt: &[u8]) -> Self {
        Self {
            seqid: seqid.into(),
            position,
            kind: VariantKind::Indel {
                refr: bases_to_string(refr),
                alt: bases_to_string(alt),
            },
        }
    }

    /// No-call for a query block identical to its target block.
    pub fn perfect_match(
        seqid: impl Into<String>,
        position: u64,
        query_name: &str,
        query_block: &[u8],
    ) -> Self {
        Self {
            seqid: seqid.into(),
            position,
            kind: VariantKind::NoCall {
                reason: NoCallReason::PerfectMatch,
                query_name: query_name.to_string(),
                query_sequence: bases_to_string(query_block),
                cigar: None,
            },
        }
    }

    /// No-call for an alignment shape the caller declines to interpret.
    pub fn inscrutable(
        seqid: impl Into<String>,
        position: u64,
        query_name: &str,
        query_sequence: &[u8],
        cigar: &str,
    ) -> Self {
        Self {
            seqid: seqid.into(),
            position,
            kind: VariantKind::NoCall {
                reason: NoCallReason::InscrutableCigar,
                query_name: query_name.to_string(),
                query_sequence: bases_to_string(query_sequence),
                cigar: Some(cigar.to_string()),
            },
        }
    }

    /// Parent sequence identifier.
    pub fn seqid(&self) -> &str {
        &self.seqid
    }

    /// 0-based global position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Kind-specific payload.
    pub fn kind(&self) -> &VariantKind {
        &self.kind
    }

    /// Whether this record is a no-call.
    pub fn is_nocall(&self) -> bool {
        matches!(self.kind, VariantKind::NoCall { .. })
    }

    /// No-call reason, if any.
    pub fn nocall_reason(&self) -> Option<NoCallReason> {
        match self.kind {
            VariantKind::NoCall { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Reference allele (`.` for no-calls).
    pub fn refr(&self) -> Cow<'_, str> {
        match &self.kind {
            VariantKind::Snv { refr, .. } => Cow::Owned((*refr as char).to_string()),
            VariantKind::Indel { refr, .. } => Cow::Borrowed(refr),
            VariantKind::NoCall { .. } => Cow::Borrowed(NO_CALL_ALLELE),
        }
    }

    /// Alternate allele (`.` for no-calls).
    pub fn alt(&self) -> Cow<'_, str> {
        match &self.kind {
            VariantKind::Snv { alt, .. } => Cow::Owned((*alt as char).to_string()),
            VariantKind::Indel { alt, .. } => Cow::Borrowed(alt),
            VariantKind::NoCall { .. } => Cow::Borrowed(NO_CALL_ALLELE),
        }
    }

    /// Raw alignment encoding (`CG`), present for inscrutable no-calls only.
    pub fn cigar(&self) -> Option<&str> {
        match &self.kind {
            VariantKind::NoCall { cigar, .. } => cigar.as_deref(),
            _ => None,
        }
    }

    /// Variant window (`VW`), present for SNVs only.
    ///
    /// The window is the query interval spanning every k-mer that overlaps
    /// the substitution:
    ///
    /// ```text
    /// NNNNNNNNNNNNNNNNNANNNNNNNNNNNNNN
    ///             NNNNNA
    ///              NNNNAN
    ///                 ...
    ///                  ANNNNN
    ///             [---------]   <- window for k = 6
    /// ```
    pub fn window(&self) -> Option<&str> {
        match &self.kind {
            VariantKind::Snv { window, .. } => Some(window),
            _ => None,
        }
    }

    /// INFO key/value pairs in output order.
    pub fn info(&self) -> Vec<(&'static str, &str)> {
        match &self.kind {
            VariantKind::Snv { window, .. } => vec![("VW", window.as_str())],
            VariantKind::Indel { .. } => Vec::new(),
            VariantKind::NoCall {
                reason,
                query_name,
                query_sequence,
                cigar,
            } => {
                let mut info = vec![
                    ("NC", reason.as_str()),
                    ("QN", query_name.as_str()),
                    ("QS", query_sequence.as_str()),
                ];
                if let Some(cigar) = cigar {
                    info.push(("CG", cigar.as_str()));
                }
                info
            }
        }
    }

    /// Render the INFO column: `;`-joined `key=value` pairs, or `.` if empty.
    pub fn info_field(&self) -> String {
        let info = self.info();
        if info.is_empty() {
            return ".".to_string();
        }
        info.iter()
            .map(|(key, value)| format!("{key}={}", value.replace(';', ":")))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Single VCF data line (no trailing newline); POS is 1-based.
    pub fn vcf(&self) -> String {
        format!(
            "{seqid}\t{pos}\t.\t{refr}\t{alt}\t.\tPASS\t{info}",
            seqid = self.seqid,
            pos = self.position + 1,
            refr = self.refr(),
            alt = self.alt(),
            info = self.info_field(),
        )
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            VariantKind::Snv { refr, alt, .. } => write!(
                f,
                "{}:{}:{}->{}",
                self.seqid, self.position, *refr as char, *alt as char
            ),
            // Shift past the anchor base; the position stays 0-based.
            VariantKind::Indel { refr, alt } if refr.len() > alt.len() => write!(
                f,
                "{}:{}:{}D",
                self.seqid,
                self.position + 1,
                refr.len() - alt.len()
            ),
            VariantKind::Indel { alt, .. } => write!(
                f,
                "{}:{}:I->{}",
                self.seqid,
                self.position + 1,
                alt.get(1..).unwrap_or_default()
            ),
            VariantKind::NoCall { reason, .. } => {
                write!(f, "{}:{}:NC={}", self.seqid, self.position, reason)
            }
        }
    }
}

fn bases_to_string(bases: &[u8]) -> String {
    String::from_utf8_lossy(bases).into_owned()
}
