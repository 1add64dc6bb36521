//! Per-column aggregation.
//!
//! For every alignment column this module tallies symbol categories and
//! derives the consensus base, base frequencies, coverage and IUPAC code.
//! Percentages are rounded half-to-even, each independently, so the four
//! base frequencies of a column need not sum to 100.

use crate::boundary::RowBoundaryMask;
use crate::iupac::{iupac_code, BaseSet, Nucleotide, Symbol, AMBIGUITY_CODES};
use crate::model::Alignment;

/// Consensus base of a column and how strongly it dominates.
///
/// This is the only column-level data the blue base pass needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusInfo {
    /// Majority base among core residues, `None` when the column has none
    pub base: Option<Nucleotide>,
    /// Largest of the four base frequency percentages
    pub frequency_max: u32,
}

impl ConsensusInfo {
    /// Returns true if the symbol is a residue equal to the consensus base.
    pub fn matches(&self, symbol: u8) -> bool {
        match (self.base, Symbol::classify(symbol)) {
            (Some(base), Symbol::Base(other)) => base == other,
            _ => false,
        }
    }
}

/// Statistics of a single alignment column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStats {
    /// 1-based column position
    pub position: usize,
    /// Counts of A, T, G, C (indexed by [`Nucleotide::index`])
    pub base_counts: [usize; 4],
    /// Counts of each ambiguity code, in [`AMBIGUITY_CODES`] order
    pub ambiguity_counts: [usize; 11],
    /// Rows whose cell is boundary-missing
    pub miss_count: usize,
    /// Gap symbols of any kind (boundary-missing and real)
    pub miss_gap_count: usize,
    /// Majority base among core residues
    pub consensus_base: Option<Nucleotide>,
    /// Occurrences of the consensus base (0 when there is none)
    pub consensus_count: usize,
    /// IUPAC symbol for the distinct bases of the column
    pub iupac: &'static str,
}

impl ColumnStats {
    pub fn count(&self, base: Nucleotide) -> usize {
        self.base_counts[base.index()]
    }

    /// Count of a single ambiguity code, 0 for anything else.
    pub fn ambiguity_count(&self, code: u8) -> usize {
        AMBIGUITY_CODES
            .iter()
            .position(|&c| c == code)
            .map(|idx| self.ambiguity_counts[idx])
            .unwrap_or(0)
    }

    /// Total of all ambiguity codes ("etc").
    pub fn etc_count(&self) -> usize {
        self.ambiguity_counts.iter().sum()
    }

    /// A + T + G + C.
    pub fn residue_count(&self) -> usize {
        self.base_counts.iter().sum()
    }

    /// Gaps inside row core zones.
    pub fn real_gap_count(&self) -> usize {
        self.miss_gap_count - self.miss_count
    }

    pub fn total_count(&self) -> usize {
        self.residue_count() + self.etc_count() + self.miss_gap_count
    }

    /// Percentage of A/T/G/C residues in the column.
    pub fn coverage(&self) -> u32 {
        percent(self.residue_count(), self.total_count())
    }

    /// Percentage of one base in the column.
    pub fn frequency(&self, base: Nucleotide) -> u32 {
        percent(self.count(base), self.total_count())
    }

    /// Largest of the four base frequencies.
    pub fn frequency_max(&self) -> u32 {
        Nucleotide::ALL
            .iter()
            .map(|&base| self.frequency(base))
            .max()
            .unwrap_or(0)
    }

    /// Consensus base as reported, `-` when the column has no core residue.
    pub fn consensus_label(&self) -> char {
        self.consensus_base.map(Nucleotide::as_char).unwrap_or('-')
    }

    pub fn consensus_info(&self) -> ConsensusInfo {
        ConsensusInfo {
            base: self.consensus_base,
            frequency_max: self.frequency_max(),
        }
    }
}

/// Rounded percentage, ties to even. Zero totals yield 0.
fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round_ties_even() as u32
}

/// Tallies one column.
///
/// `masks` must hold one entry per alignment row.
pub fn aggregate_column(alignment: &Alignment, masks: &[RowBoundaryMask], col: usize) -> ColumnStats {
    let mut base_counts = [0usize; 4];
    let mut ambiguity_counts = [0usize; 11];
    let mut miss_count = 0;
    let mut miss_gap_count = 0;
    let mut present = BaseSet::new();

    // Core residue pool: count and first row seen, per base
    let mut pool_counts = [0usize; 4];
    let mut pool_first_row = [usize::MAX; 4];

    for (row, symbol) in alignment.column(col).enumerate() {
        let boundary_missing = masks
            .get(row)
            .map(|mask| mask.is_boundary_missing(col))
            .unwrap_or(false);
        if boundary_missing {
            miss_count += 1;
        }

        match Symbol::classify(symbol) {
            Symbol::Base(base) => {
                base_counts[base.index()] += 1;
                present.insert(base);
                if !boundary_missing {
                    let idx = base.index();
                    pool_counts[idx] += 1;
                    pool_first_row[idx] = pool_first_row[idx].min(row);
                }
            }
            Symbol::Ambiguous(idx) => ambiguity_counts[idx] += 1,
            Symbol::Gap => miss_gap_count += 1,
        }
    }

    let (consensus_base, consensus_count) = majority(&pool_counts, &pool_first_row);

    ColumnStats {
        position: col + 1,
        base_counts,
        ambiguity_counts,
        miss_count,
        miss_gap_count,
        consensus_base,
        consensus_count,
        iupac: iupac_code(present),
    }
}

/// Picks the most frequent base; ties go to the base seen first in row order.
fn majority(counts: &[usize; 4], first_row: &[usize; 4]) -> (Option<Nucleotide>, usize) {
    Nucleotide::ALL
        .into_iter()
        .filter(|base| counts[base.index()] > 0)
        .max_by(|a, b| {
            counts[a.index()]
                .cmp(&counts[b.index()])
                .then(first_row[b.index()].cmp(&first_row[a.index()]))
        })
        .map(|base| (Some(base), counts[base.index()]))
        .unwrap_or((None, 0))
}

/// Aggregates every column, in column order.
pub fn aggregate_columns(alignment: &Alignment, masks: &[RowBoundaryMask]) -> Vec<ColumnStats> {
    (0..alignment.alignment_length())
        .map(|col| aggregate_column(alignment, masks, col))
        .collect()
}
