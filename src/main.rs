//! bluebase - alignment statistics and blue base concordance
//!
//! Reads a FASTA multiple alignment and writes two reports: a per-column
//! statistics table and a gap / blue base summary.
//!
//! ## Usage
//!
//! ```bash
//! bluebase aligned.fasta -p results/sample        # results/sample.txt + results/sample_gapStat.log
//! bluebase aligned.fasta --align-stat cols.tsv --gap-stat summary.log
//! bluebase -vv aligned.fasta -p out               # with debug logging
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

use bluebase::report::ReportPaths;
use bluebase::stats::write_statistics;

/// bluebase - Column, gap and blue base statistics for a nucleotide alignment
///
/// Either give an output prefix (-p), or both --align-stat and --gap-stat.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Aligned FASTA file (equal-length rows, gaps as '-' or '.')
    input: PathBuf,

    /// Output prefix: writes <PREFIX>.txt and <PREFIX>_gapStat.log
    #[arg(short = 'p', long = "prefix", conflicts_with_all = ["align_stat", "gap_stat"])]
    prefix: Option<PathBuf>,

    /// Per-column statistics table output
    #[arg(long = "align-stat", requires = "gap_stat")]
    align_stat: Option<PathBuf>,

    /// Gap and blue base summary output
    #[arg(long = "gap-stat", requires = "align_stat")]
    gap_stat: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Args {
    fn report_paths(&self) -> Result<ReportPaths> {
        match (&self.prefix, &self.align_stat, &self.gap_stat) {
            (Some(prefix), _, _) => Ok(ReportPaths::from_prefix(prefix)),
            (None, Some(table), Some(summary)) => Ok(ReportPaths::new(table, summary)),
            _ => anyhow::bail!("Either --prefix or both --align-stat and --gap-stat are required"),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let paths = args.report_paths()?;

    let summary = write_statistics(&args.input, &paths)
        .with_context(|| format!("Failed to compute statistics for {}", args.input.display()))?;

    eprintln!(
        "Analyzed {} sequences x {} columns; wrote {} and {}",
        summary.sequence_count,
        summary.alignment_length,
        paths.column_table.display(),
        paths.summary.display()
    );

    Ok(())
}
