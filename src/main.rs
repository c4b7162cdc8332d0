use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use contigcall::genomics::{read_fasta, write_header, write_record, AffineAligner, PairwiseCallDriver};
use contigcall::{CallConfig, ScoringParams};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "contigcall",
    about = "Call variants from assembled contigs aligned to reference target windows"
)]
struct Cli {
    /// Only log warnings and errors (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align each contig to each target window and write variant calls as VCF.
    Call {
        #[command(flatten)]
        inputs: Inputs,
        /// Output VCF (default: stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// k-mer size used for variant windows.
        #[arg(short, long, default_value_t = contigcall::config::DEFAULT_KSIZE)]
        ksize: usize,
        /// Write data lines only.
        #[arg(long)]
        no_header: bool,
    },
    /// Print the alignment encoding for every target/contig pair.
    Align {
        #[command(flatten)]
        inputs: Inputs,
    },
}

#[derive(Args, Debug)]
struct Inputs {
    /// Assembled contigs (FASTA).
    queryseq: PathBuf,
    /// Reference target windows named `<seqId>_<start>-<end>` (FASTA).
    targetseq: PathBuf,
    /// Match score.
    #[arg(long = "match", default_value_t = 1)]
    match_score: i32,
    /// Mismatch penalty.
    #[arg(long, default_value_t = 2)]
    mismatch: i32,
    /// Gap open penalty.
    #[arg(long = "open", default_value_t = 5)]
    gap_open: i32,
    /// Gap extension penalty.
    #[arg(long = "extend", default_value_t = 0)]
    gap_extend: i32,
}

impl Inputs {
    fn scoring(&self) -> ScoringParams {
        ScoringParams::new(self.match_score, self.mismatch, self.gap_open, self.gap_extend)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Call {
            inputs,
            out,
            ksize,
            no_header,
        } => run_call(inputs, out, ksize, no_header)?,
        Commands::Align { inputs } => run_align(inputs)?,
    }

    Ok(())
}

fn run_call(inputs: Inputs, out: Option<PathBuf>, ksize: usize, no_header: bool) -> Result<()> {
    let config = CallConfig::default()
        .with_scoring(inputs.scoring())
        .with_ksize(ksize);
    let driver = build_driver(&inputs, &config)?;

    let mut writer: Box<dyn Write> = match &out {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to create output file {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if !no_header {
        write_header(&mut writer)?;
    }
    let mut calls = driver.calls();
    for call in calls.by_ref() {
        let variant = call.context("variant calling aborted")?;
        write_record(&mut writer, &variant)?;
    }
    writer.flush()?;

    let stats = calls.stats();
    info!(
        pairs = stats.pairs,
        variants = stats.variants,
        nocalls = stats.nocalls,
        "contigcall: calling complete"
    );
    Ok(())
}

fn run_align(inputs: Inputs) -> Result<()> {
    let config = CallConfig::default().with_scoring(inputs.scoring());
    let driver = build_driver(&inputs, &config)?;

    let mut writer = BufWriter::new(io::stdout().lock());
    for pair in driver.alignments() {
        writeln!(writer, "{}\t{}\t{}", pair.target.name, pair.query.name, pair.cigar)?;
    }
    writer.flush()?;
    Ok(())
}

fn build_driver(inputs: &Inputs, config: &CallConfig) -> Result<PairwiseCallDriver<AffineAligner>> {
    config.validate().context("invalid configuration")?;

    let queries = read_fasta(&inputs.queryseq)?;
    let targets = read_fasta(&inputs.targetseq)?;
    info!(
        targets = targets.len(),
        queries = queries.len(),
        "loaded input sequences"
    );

    let aligner = AffineAligner::new(config.scoring);
    Ok(PairwiseCallDriver::new(targets, queries, aligner, config.ksize))
}
