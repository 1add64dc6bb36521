//! Boundary classification of alignment rows.
//!
//! Reads of different lengths aligned together leave gaps at the row ends
//! that are not real indels: the sequence simply does not extend there.
//! Each row is scanned twice:
//! - front to end, tagging gaps before the first residue as `Missing`
//! - end to front, tagging gaps after the last residue as `Missing`
//!
//! A position is boundary-missing when the two scans disagree. Gaps between
//! the first and last residue (the core zone) are real gaps.

use std::ops::RangeInclusive;

use crate::iupac::GAP;
use crate::model::Alignment;

/// Tag produced by one directional scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryTag {
    /// No residue seen yet in the scan direction
    Missing,
    /// At or past the first residue in the scan direction
    Present,
}

/// Zone of a position within its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Before the first residue
    LeadingMissing,
    /// Between the first and last residue, inclusive
    Core,
    /// After the last residue
    TrailingMissing,
    /// The row holds no residue at all
    Empty,
}

/// Front and end tags of a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBoundaryMask {
    front: Vec<BoundaryTag>,
    end: Vec<BoundaryTag>,
    core: Option<RangeInclusive<usize>>,
}

impl RowBoundaryMask {
    /// Scans a normalized row in both directions.
    pub fn scan(row: &[u8]) -> Self {
        let front = directional_scan(row.iter());
        let mut end = directional_scan(row.iter().rev());
        end.reverse();

        let first = row.iter().position(|&b| b != GAP);
        let last = row.iter().rposition(|&b| b != GAP);
        let core = match (first, last) {
            (Some(first), Some(last)) => Some(first..=last),
            _ => None,
        };

        Self { front, end, core }
    }

    /// Tag from the front-to-end scan.
    pub fn front_tag(&self, pos: usize) -> Option<BoundaryTag> {
        self.front.get(pos).copied()
    }

    /// Tag from the end-to-front scan.
    pub fn end_tag(&self, pos: usize) -> Option<BoundaryTag> {
        self.end.get(pos).copied()
    }

    /// True when exactly one scan tags the position as missing.
    ///
    /// Rows without residues are missing from both sides and are never flagged.
    pub fn is_boundary_missing(&self, pos: usize) -> bool {
        match (self.front_tag(pos), self.end_tag(pos)) {
            (Some(front), Some(end)) => front != end,
            _ => false,
        }
    }

    /// Inclusive range from the first to the last residue, if any.
    pub fn core_zone(&self) -> Option<RangeInclusive<usize>> {
        self.core.clone()
    }

    #[cfg(test)]
    fn missing_count(&self) -> usize {
        (0..self.front.len()).filter(|&pos| self.is_boundary_missing(pos)).count()
    }

    /// Zone of a position.
    pub fn zone_at(&self, pos: usize) -> Zone {
        match &self.core {
            None => Zone::Empty,
            Some(core) if pos < *core.start() => Zone::LeadingMissing,
            Some(core) if pos > *core.end() => Zone::TrailingMissing,
            Some(_) => Zone::Core,
        }
    }
}

/// Tags positions `Missing` until the first residue, then `Present`.
fn directional_scan<'a, I>(symbols: I) -> Vec<BoundaryTag>
where
    I: Iterator<Item = &'a u8>,
{
    let mut seen_base = false;
    symbols
        .map(|&symbol| {
            if !seen_base && symbol != GAP {
                seen_base = true;
            }
            if seen_base {
                BoundaryTag::Present
            } else {
                BoundaryTag::Missing
            }
        })
        .collect()
}

/// Computes the boundary mask of every row, in row order.
pub fn classify_rows(alignment: &Alignment) -> Vec<RowBoundaryMask> {
    alignment
        .sequences()
        .map(|seq| RowBoundaryMask::scan(seq.as_bytes()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::BoundaryTag::{Missing, Present};

    #[test]
    fn test_scan_tags() {
        let mask = RowBoundaryMask::scan(b"--AT--");
        assert_eq!(mask.front, vec![Missing, Missing, Present, Present, Present, Present]);
        assert_eq!(mask.end, vec![Present, Present, Present, Present, Missing, Missing]);
    }

    #[test]
    fn test_boundary_missing_positions() {
        let mask = RowBoundaryMask::scan(b"--AT--");
        let flagged: Vec<bool> = (0..6).map(|p| mask.is_boundary_missing(p)).collect();
        assert_eq!(flagged, vec![true, true, false, false, true, true]);
        assert_eq!(mask.missing_count(), 4);
        assert_eq!(mask.core_zone(), Some(2..=3));
    }

    #[test]
    fn test_inner_gaps_are_core() {
        let mask = RowBoundaryMask::scan(b"AT--GC");
        assert_eq!(mask.missing_count(), 0);
        assert_eq!(mask.core_zone(), Some(0..=5));
        assert_eq!(mask.zone_at(2), Zone::Core);
    }

    #[test]
    fn test_zones() {
        let mask = RowBoundaryMask::scan(b"-A-C--");
        assert_eq!(mask.zone_at(0), Zone::LeadingMissing);
        assert_eq!(mask.zone_at(1), Zone::Core);
        assert_eq!(mask.zone_at(2), Zone::Core);
        assert_eq!(mask.zone_at(3), Zone::Core);
        assert_eq!(mask.zone_at(4), Zone::TrailingMissing);
        assert!(!mask.is_boundary_missing(2));
        assert!(mask.is_boundary_missing(5));
    }

    #[test]
    fn test_all_gap_row_is_not_flagged() {
        let mask = RowBoundaryMask::scan(b"----");
        assert_eq!(mask.front_tag(0), Some(Missing));
        assert_eq!(mask.end_tag(0), Some(Missing));
        assert_eq!(mask.missing_count(), 0);
        assert_eq!(mask.core_zone(), None);
        assert_eq!(mask.zone_at(1), Zone::Empty);
    }

    #[test]
    fn test_ambiguity_codes_count_as_residues() {
        let mask = RowBoundaryMask::scan(b"-N-");
        assert_eq!(mask.core_zone(), Some(1..=1));
        assert_eq!(mask.missing_count(), 2);
    }
}
