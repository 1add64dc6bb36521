//! Data model for alignment statistics.
//!
//! This module contains the in-memory alignment matrix:
//! - `Sequence`: one row, identifier plus normalized symbols
//! - `Alignment`: validated rows sharing a single length
//!
//! Rows are normalized on construction (uppercase, `.` as `-`), so every
//! later stage can compare raw bytes directly.

use thiserror::Error;

use crate::iupac::{normalize_symbol, GAP};

/// Structural problems that make a set of rows unusable as an alignment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("Alignment contains no sequences")]
    NoSequences,

    #[error("Sequence '{0}' has no residues")]
    EmptySequence(String),

    #[error("Sequence '{id}' has length {len}, expected {expected}. Not a valid alignment.")]
    UnequalLengths {
        id: String,
        len: usize,
        expected: usize,
    },
}

/// Represents a single aligned sequence with its identifier and symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (from FASTA header, without '>')
    pub id: String,
    /// Normalized symbols, one byte per alignment column
    data: Vec<u8>,
}

impl Sequence {
    /// Creates a new sequence, normalizing every symbol.
    pub fn new(id: impl Into<String>, data: impl AsRef<[u8]>) -> Self {
        Self::from_bytes(id, data.as_ref().to_vec())
    }

    /// Creates a sequence from raw bytes, normalizing them in place.
    pub fn from_bytes(id: impl Into<String>, mut data: Vec<u8>) -> Self {
        for byte in data.iter_mut() {
            *byte = normalize_symbol(*byte);
        }
        Self { id: id.into(), data }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the normalized symbols.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the normalized symbols as text.
    pub fn as_str(&self) -> &str {
        // Normalized symbols are always ASCII
        std::str::from_utf8(&self.data).unwrap_or_default()
    }

    /// Gets the symbol at a specific position.
    pub fn symbol_at(&self, pos: usize) -> Option<u8> {
        self.data.get(pos).copied()
    }
}

/// A validated multiple sequence alignment.
///
/// Holds at least one row, and every row has the same non-zero length.
#[derive(Debug, Clone)]
pub struct Alignment {
    sequences: Vec<Sequence>,
    alignment_length: usize,
}

impl Alignment {
    /// Creates an alignment, rejecting empty inputs and ragged rows.
    pub fn new(sequences: Vec<Sequence>) -> Result<Self, AlignmentError> {
        let alignment_length = Self::validate_alignment(&sequences)?;
        Ok(Self {
            sequences,
            alignment_length,
        })
    }

    /// Validates that all sequences have the same non-zero length.
    fn validate_alignment(sequences: &[Sequence]) -> Result<usize, AlignmentError> {
        let first = sequences.first().ok_or(AlignmentError::NoSequences)?;

        if let Some(empty) = sequences.iter().find(|s| s.is_empty()) {
            return Err(AlignmentError::EmptySequence(empty.id.clone()));
        }

        let expected = first.len();
        match sequences.iter().find(|s| s.len() != expected) {
            Some(other) => Err(AlignmentError::UnequalLengths {
                id: other.id.clone(),
                len: other.len(),
                expected,
            }),
            None => Ok(expected),
        }
    }

    /// Returns the number of sequences.
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Returns the alignment length (number of columns).
    pub fn alignment_length(&self) -> usize {
        self.alignment_length
    }

    /// Gets a sequence by index.
    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.sequences.get(index)
    }

    /// Iterates over the rows in input order.
    pub fn sequences(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.iter()
    }

    /// Returns the symbol of a cell, or the gap symbol when the cell does not exist.
    pub fn symbol_at(&self, row: usize, col: usize) -> u8 {
        self.sequences
            .get(row)
            .and_then(|seq| seq.symbol_at(col))
            .unwrap_or(GAP)
    }

    /// Iterates over the symbols of one column, in row order.
    pub fn column(&self, col: usize) -> impl Iterator<Item = u8> + '_ {
        (0..self.sequences.len()).map(move |row| self.symbol_at(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_creation() {
        let seq = Sequence::new("seq1", "acg.t");
        assert_eq!(seq.id, "seq1");
        assert_eq!(seq.as_str(), "ACG-T");
        assert_eq!(seq.len(), 5);
    }

    #[test]
    fn test_sequence_symbol_at() {
        let seq = Sequence::new("seq1", "ACGT");
        assert_eq!(seq.symbol_at(0), Some(b'A'));
        assert_eq!(seq.symbol_at(3), Some(b'T'));
        assert_eq!(seq.symbol_at(4), None);
    }

    #[test]
    fn test_alignment_valid() {
        let seqs = vec![Sequence::new("seq1", "ACGT"), Sequence::new("seq2", "TGCA")];
        let alignment = Alignment::new(seqs).unwrap();
        assert_eq!(alignment.sequence_count(), 2);
        assert_eq!(alignment.alignment_length(), 4);
        assert_eq!(alignment.column(1).collect::<Vec<_>>(), b"CG".to_vec());
    }

    #[test]
    fn test_alignment_unequal_lengths() {
        let seqs = vec![Sequence::new("seq1", "ACGT"), Sequence::new("seq2", "TG")];
        let err = Alignment::new(seqs).unwrap_err();
        assert_eq!(
            err,
            AlignmentError::UnequalLengths {
                id: "seq2".to_string(),
                len: 2,
                expected: 4,
            }
        );
    }

    #[test]
    fn test_alignment_degenerate() {
        assert_eq!(Alignment::new(Vec::new()).unwrap_err(), AlignmentError::NoSequences);
        let seqs = vec![Sequence::new("seq1", "ACGT"), Sequence::new("seq2", "")];
        assert_eq!(
            Alignment::new(seqs).unwrap_err(),
            AlignmentError::EmptySequence("seq2".to_string())
        );
    }

    #[test]
    fn test_symbol_at_falls_back_to_gap() {
        let alignment = Alignment::new(vec![Sequence::new("seq1", "AC")]).unwrap();
        assert_eq!(alignment.symbol_at(0, 1), b'C');
        assert_eq!(alignment.symbol_at(0, 2), GAP);
        assert_eq!(alignment.symbol_at(3, 0), GAP);
    }
}
