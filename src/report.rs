//! Report rendering.
//!
//! Two plain-text artifacts are produced:
//! - the per-column table: a `Position` header, then one tab-separated line
//!   per statistic with one value per alignment column
//! - the summary: `<label> :<value>` lines for the alignment-wide scalars,
//!   followed by the six blue base buckets
//!
//! Floats are written in shortest round-trip form with at least one
//! fractional digit (`1.0`, `0.75`), switching to exponent notation below
//! 1e-4, which keeps output byte-compatible with historical reports.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::bluebase::CUTOFFS;
use crate::columns::ColumnStats;
use crate::iupac::Nucleotide;
use crate::stats::AlignmentStatistics;

/// Output locations of the two reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Per-column statistics table
    pub column_table: PathBuf,
    /// Gap and blue base summary
    pub summary: PathBuf,
}

impl ReportPaths {
    pub fn new(column_table: impl Into<PathBuf>, summary: impl Into<PathBuf>) -> Self {
        Self {
            column_table: column_table.into(),
            summary: summary.into(),
        }
    }

    /// Derives `<prefix>.txt` and `<prefix>_gapStat.log`.
    pub fn from_prefix<P: AsRef<Path>>(prefix: P) -> Self {
        let prefix = prefix.as_ref().as_os_str();
        let mut column_table = prefix.to_os_string();
        column_table.push(".txt");
        let mut summary = prefix.to_os_string();
        summary.push("_gapStat.log");
        Self::new(column_table, summary)
    }
}

/// Formats a float the way the historical reports did.
pub fn format_float(value: f64) -> String {
    let scientific = format!("{:e}", value);
    let exponent = scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse::<i32>().ok());

    match exponent {
        Some(exp) if !(-4..16).contains(&exp) => {
            let mantissa = scientific.split('e').next().unwrap_or_default();
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ => {
            let plain = value.to_string();
            if plain.contains('.') || !value.is_finite() {
                plain
            } else {
                format!("{}.0", plain)
            }
        }
    }
}

/// Formats an optional ratio, writing a bare `0` when it is undefined.
fn format_optional(value: Option<f64>) -> String {
    value.map(format_float).unwrap_or_else(|| "0".to_string())
}

fn write_row<W, F, T>(out: &mut W, name: &str, columns: &[ColumnStats], value: F) -> io::Result<()>
where
    W: Write,
    F: Fn(&ColumnStats) -> T,
    T: std::fmt::Display,
{
    write!(out, "{}", name)?;
    for column in columns {
        write!(out, "\t{}", value(column))?;
    }
    writeln!(out)
}

/// Writes the per-column statistics table.
pub fn write_column_table<W: Write>(out: &mut W, columns: &[ColumnStats]) -> io::Result<()> {
    write_row(out, "Position", columns, |c| c.position)?;

    for base in Nucleotide::ALL {
        write_row(out, &format!("{} count", base), columns, |c| c.count(base))?;
    }
    write_row(out, "Miss count", columns, |c| c.miss_count)?;
    write_row(out, "Gap count", columns, |c| c.real_gap_count())?;
    write_row(out, "etc count", columns, |c| c.etc_count())?;
    write_row(out, "MissGap count", columns, |c| c.miss_gap_count)?;
    for base in Nucleotide::ALL {
        write_row(out, &format!("{} freq", base), columns, |c| c.frequency(base))?;
    }
    write_row(out, "Total count", columns, |c| c.total_count())?;
    write_row(out, "Coverage", columns, |c| c.coverage())?;
    write_row(out, "IUPAC", columns, |c| c.iupac)?;
    write_row(out, "Major base", columns, |c| c.consensus_label())?;
    write_row(out, "Major base count", columns, |c| c.consensus_count)
}

/// Writes the gap and blue base summary.
pub fn write_summary<W: Write>(out: &mut W, stats: &AlignmentStatistics) -> io::Result<()> {
    let gaps = &stats.gaps;
    let tally = &stats.blue_bases;

    let lines: [(&str, String); 10] = [
        ("Total seqs", stats.sequence_count.to_string()),
        ("Gap seq. count", gaps.gap_seq_count.to_string()),
        ("Gap count", gaps.gap_count.to_string()),
        ("Gap frequency", format_optional(gaps.gap_frequency())),
        ("Sum of gap length", gaps.gap_sum_length.to_string()),
        ("Gap length", format_optional(gaps.gap_avg_length())),
        ("Sum of blue bases", tally.blue_base_count().to_string()),
        ("No blue bases", tally.no_blue_base_count.to_string()),
        ("No miss bases", tally.nomiss_base_count.to_string()),
        ("Blue base ratio", format_float(stats.blue_base_ratio)),
    ];
    for (label, value) in lines {
        writeln!(out, "{} :{}", label, value)?;
    }

    writeln!(out, "Blue bases:")?;
    for (cutoff, count) in CUTOFFS.iter().zip(tally.buckets) {
        writeln!(out, "{} :{}", format_float(f64::from(*cutoff)), count)?;
    }
    Ok(())
}

fn render<F>(write: F) -> io::Result<String>
where
    F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
{
    let mut buf = Vec::new();
    write(&mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Renders the per-column table into a string.
pub fn render_column_table(columns: &[ColumnStats]) -> io::Result<String> {
    render(|buf| write_column_table(buf, columns))
}

/// Renders the summary into a string.
pub fn render_summary(stats: &AlignmentStatistics) -> io::Result<String> {
    render(|buf| write_summary(buf, stats))
}

/// Writes both reports.
///
/// Both artifacts are rendered in memory before either file is created.
pub fn write_reports(stats: &AlignmentStatistics, paths: &ReportPaths) -> io::Result<()> {
    let table = render_column_table(&stats.columns)?;
    let summary = render_summary(stats)?;

    for (path, content) in [(&paths.column_table, table), (&paths.summary, summary)] {
        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(content.as_bytes())?;
        out.flush()?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}
