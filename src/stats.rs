//! Alignment statistics engine.
//!
//! Runs the stages in order, each over the previous stage's output:
//! boundary classification, column aggregation, then gap statistics and
//! blue base classification. Nothing is written until every stage succeeded.

use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::bluebase::{classify_blue_bases, BlueBaseTally};
use crate::boundary::classify_rows;
use crate::columns::{aggregate_columns, ColumnStats, ConsensusInfo};
use crate::fasta::{parse_fasta_file, LoadError};
use crate::gaps::{collect_gap_statistics, GapStatistics};
use crate::model::Alignment;
use crate::report::{write_reports, ReportPaths};

/// Errors raised while computing or writing statistics.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Cannot load alignment: {0}")]
    Input(#[from] LoadError),

    #[error("Degenerate alignment: {0}")]
    Degenerate(String),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Everything computed from one alignment.
#[derive(Debug, Clone)]
pub struct AlignmentStatistics {
    pub sequence_count: usize,
    pub alignment_length: usize,
    /// Column statistics, one per column
    pub columns: Vec<ColumnStats>,
    pub gaps: GapStatistics,
    pub blue_bases: BlueBaseTally,
    pub blue_base_ratio: f64,
}

impl AlignmentStatistics {
    /// Computes all statistics of an alignment.
    ///
    /// Fails when the alignment holds no residue at all, since the blue base
    /// ratio is then undefined.
    pub fn compute(alignment: &Alignment) -> StatsResult<Self> {
        let masks = classify_rows(alignment);
        let columns = aggregate_columns(alignment, &masks);

        let consensus: Vec<ConsensusInfo> =
            columns.iter().map(ColumnStats::consensus_info).collect();
        let gaps = collect_gap_statistics(alignment, &masks);
        let blue_bases = classify_blue_bases(alignment, &consensus);

        let blue_base_ratio = blue_bases.blue_base_ratio().ok_or_else(|| {
            StatsError::Degenerate("alignment contains only gaps".to_string())
        })?;

        debug!(
            "Gap rows: {}, gap runs: {}, summed gap length: {}",
            gaps.gap_seq_count, gaps.gap_count, gaps.gap_sum_length
        );
        info!(
            "Blue bases: {} of {} residues (ratio {})",
            blue_bases.blue_base_count(),
            blue_bases.nomiss_base_count,
            blue_base_ratio
        );

        Ok(Self {
            sequence_count: alignment.sequence_count(),
            alignment_length: alignment.alignment_length(),
            columns,
            gaps,
            blue_bases,
            blue_base_ratio,
        })
    }
}

/// Outcome of a full run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub sequence_count: usize,
    pub alignment_length: usize,
    /// `Total count` of the first column
    pub first_column_total: usize,
}

/// Loads an alignment, computes its statistics and writes both reports.
///
/// No output file is created when loading or computation fails.
pub fn write_statistics<P: AsRef<Path>>(input: P, paths: &ReportPaths) -> StatsResult<RunSummary> {
    let input = input.as_ref();
    let alignment = parse_fasta_file(input)?;
    info!(
        "Loaded {} sequences x {} columns from {}",
        alignment.sequence_count(),
        alignment.alignment_length(),
        input.display()
    );

    let stats = AlignmentStatistics::compute(&alignment)?;
    write_reports(&stats, paths)?;

    Ok(RunSummary {
        sequence_count: stats.sequence_count,
        alignment_length: stats.alignment_length,
        first_column_total: stats.columns.first().map(ColumnStats::total_count).unwrap_or(0),
    })
}
