//! Gap statistics over row core zones.
//!
//! Only gaps strictly between a row's first and last residue are real
//! indels; boundary-missing gaps never count here.

use crate::boundary::{RowBoundaryMask, Zone};
use crate::iupac::GAP;
use crate::model::Alignment;

/// A maximal run of gaps inside a row's core zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapRun {
    /// Offset of the first gap, relative to the start of the core zone
    pub start: usize,
    pub length: usize,
}

/// Finds the gap runs of one row.
pub fn core_gap_runs(row: &[u8], mask: &RowBoundaryMask) -> Vec<GapRun> {
    let Some(core_start) = mask.core_zone().map(|core| *core.start()) else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut open: Option<usize> = None;
    for (pos, &symbol) in row.iter().enumerate() {
        if mask.zone_at(pos) != Zone::Core {
            continue;
        }
        let offset = pos - core_start;
        match (symbol == GAP, open) {
            (true, None) => open = Some(offset),
            (false, Some(start)) => {
                runs.push(GapRun {
                    start,
                    length: offset - start,
                });
                open = None;
            }
            _ => {}
        }
    }
    // A core zone ends on a residue, so every run is closed here
    runs
}

/// Alignment-wide gap statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GapStatistics {
    /// Rows with at least one core gap
    pub gap_seq_count: usize,
    /// Number of gap runs over all rows
    pub gap_count: usize,
    /// Summed length of all gap runs
    pub gap_sum_length: usize,
}

impl GapStatistics {
    /// Adds the runs of one row.
    pub fn add_row(&mut self, runs: &[GapRun]) {
        if runs.is_empty() {
            return;
        }
        self.gap_seq_count += 1;
        self.gap_count += runs.len();
        self.gap_sum_length += runs.iter().map(|run| run.length).sum::<usize>();
    }

    /// Gap runs per gapped row, `None` when no row has a core gap.
    pub fn gap_frequency(&self) -> Option<f64> {
        (self.gap_seq_count > 0).then(|| self.gap_count as f64 / self.gap_seq_count as f64)
    }

    /// Gap length per gapped row, `None` when no row has a core gap.
    pub fn gap_avg_length(&self) -> Option<f64> {
        (self.gap_seq_count > 0).then(|| self.gap_sum_length as f64 / self.gap_seq_count as f64)
    }
}

/// Collects gap statistics over every row.
pub fn collect_gap_statistics(alignment: &Alignment, masks: &[RowBoundaryMask]) -> GapStatistics {
    let mut stats = GapStatistics::default();
    for (seq, mask) in alignment.sequences().zip(masks) {
        stats.add_row(&core_gap_runs(seq.as_bytes(), mask));
    }
    stats
}
