use std::io::Write;

use anyhow::{anyhow, Result};

use super::Variant;

const HEADER: &str = concat!(
    "##fileformat=VCFv4.3\n",
    "##source=contigcall\n",
    "##INFO=<ID=NC,Number=1,Type=String,Description=\"Reason no variant was called\">\n",
    "##INFO=<ID=QN,Number=1,Type=String,Description=\"Query contig identifier\">\n",
    "##INFO=<ID=QS,Number=1,Type=String,Description=\"Query contig sequence\">\n",
    "##INFO=<ID=CG,Number=1,Type=String,Description=\"Alignment of the query against the target\">\n",
    "##INFO=<ID=VW,Number=1,Type=String,Description=\"Query interval spanning every k-mer overlapping the variant\">\n",
    "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n",
);

/// Write the VCF meta-information and column header lines.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writer.write_all(HEADER.as_bytes())?;
    Ok(())
}

/// Write a single variant line.
pub fn write_record<W: Write>(writer: &mut W, variant: &Variant) -> Result<()> {
    writeln!(writer, "{}", variant.vcf())?;
    Ok(())
}

/// Write variants in VCF form, optionally preceded by the header.
pub fn write_vcf<W: Write>(writer: &mut W, variants: &[Variant], header: bool) -> Result<()> {
    if header {
        write_header(writer)?;
    }
    for variant in variants {
        write_record(writer, variant)?;
    }

    writer.flush()?;
    Ok(())
}

/// Render variants into a VCF string (useful for tests and snapshots).
pub fn render_vcf(variants: &[Variant]) -> Result<String> {
    let mut buffer = Vec::new();
    write_vcf(&mut buffer, variants, true)?;
    String::from_utf8(buffer).map_err(|_| anyhow!("rendered VCF is not valid UTF-8"))
}
