use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use bio::io::fasta;

use crate::genomics::SequenceRecord;

/// Load every record of a FASTA file into memory.
///
/// Identifiers are taken up to the first whitespace; descriptions are
/// dropped. Bases are kept exactly as written.
pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open FASTA file {}", path.display()))?;
    parse_fasta(file).with_context(|| format!("failed to parse FASTA file {}", path.display()))
}

/// Parse FASTA records from any reader.
pub fn parse_fasta<R: Read>(reader: R) -> Result<Vec<SequenceRecord>> {
    fasta::Reader::new(reader)
        .records()
        .enumerate()
        .map(|(idx, record)| {
            let record = record.with_context(|| format!("malformed record {}", idx + 1))?;
            Ok(SequenceRecord::new(record.id(), record.seq().to_vec()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiline_records() {
        let input = b">chr1_100-112 extracted window\nACGTAC\nGTACGT\n>contig2\nacgt\n";
        let records = parse_fasta(&input[..]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&*records[0].name, "chr1_100-112");
        assert_eq!(&records[0].sequence[..], b"ACGTACGTACGT");
        assert_eq!(&records[1].sequence[..], b"acgt");
    }
}
