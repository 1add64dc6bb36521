//! Blue base classification.
//!
//! A blue base is a residue that agrees with its column's consensus base.
//! Blue bases are binned by how strongly the consensus dominates its column
//! (the column's largest base frequency):
//!
//! | bucket | dominance `d`     |
//! |--------|-------------------|
//! | 90     | `90 <= d <= 100`  |
//! | 80     | `80 <= d < 90`    |
//! | 70     | `70 <= d < 80`    |
//! | 60     | `60 <= d < 70`    |
//! | 50     | `50 <= d < 60`    |
//! | 40     | `d < 50`          |

use crate::columns::ConsensusInfo;
use crate::iupac::GAP;
use crate::model::Alignment;

/// Bucket cutoffs, in report order.
pub const CUTOFFS: [u32; 6] = [90, 80, 70, 60, 50, 40];

/// Returns the index in [`CUTOFFS`] of the bucket for a dominance percentage.
///
/// Only the top bucket includes its upper bound; anything below 40 is folded
/// into the 40 bucket.
pub fn bucket_index(dominance: u32) -> Option<usize> {
    CUTOFFS
        .iter()
        .enumerate()
        .position(|(idx, &cutoff)| {
            let upper_ok = if idx == 0 {
                dominance <= cutoff + 10
            } else {
                dominance < cutoff + 10
            };
            cutoff <= dominance && upper_ok
        })
        .or_else(|| (dominance < CUTOFFS[CUTOFFS.len() - 1]).then_some(CUTOFFS.len() - 1))
}

/// Blue base counts of an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlueBaseTally {
    /// Concordant residues per bucket, in [`CUTOFFS`] order
    pub buckets: [usize; 6],
    /// Residues that disagree with their column consensus
    pub no_blue_base_count: usize,
    /// All non-gap cells
    pub nomiss_base_count: usize,
}

impl BlueBaseTally {
    /// Count of the bucket with the given cutoff, 0 for unknown cutoffs.
    pub fn bucket(&self, cutoff: u32) -> usize {
        CUTOFFS
            .iter()
            .position(|&c| c == cutoff)
            .map(|idx| self.buckets[idx])
            .unwrap_or(0)
    }

    /// Sum of all six buckets.
    pub fn blue_base_count(&self) -> usize {
        self.buckets.iter().sum()
    }

    /// Blue bases over non-gap cells, `None` when the alignment holds no residue.
    pub fn blue_base_ratio(&self) -> Option<f64> {
        (self.nomiss_base_count > 0)
            .then(|| self.blue_base_count() as f64 / self.nomiss_base_count as f64)
    }

    /// Records one cell.
    pub fn add_cell(&mut self, symbol: u8, consensus: &ConsensusInfo) {
        if symbol == GAP {
            return;
        }
        self.nomiss_base_count += 1;

        if consensus.matches(symbol) {
            if let Some(idx) = bucket_index(consensus.frequency_max) {
                self.buckets[idx] += 1;
            }
        } else {
            self.no_blue_base_count += 1;
        }
    }
}

/// Classifies every cell, row by row, against the per-column consensus.
///
/// `consensus` holds one entry per alignment column.
pub fn classify_blue_bases(alignment: &Alignment, consensus: &[ConsensusInfo]) -> BlueBaseTally {
    let mut tally = BlueBaseTally::default();
    for seq in alignment.sequences() {
        for (&symbol, info) in seq.as_bytes().iter().zip(consensus) {
            tally.add_cell(symbol, info);
        }
    }
    tally
}
