//! FASTA alignment loader.
//!
//! This module reads a FASTA multiple alignment into an [`Alignment`].
//! It supports both single-line and multi-line sequences.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGT--ACGTAC
//! >another_sequence
//! TGCATG..ATGC
//! ```
//!
//! Symbols are uppercased and `.` is read as `-`. Bytes outside the
//! nucleotide/IUPAC/gap alphabet are loaded as gaps and reported with a warning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::iupac::is_known_symbol;
use crate::model::{Alignment, AlignmentError, Sequence};

/// Errors that can occur while loading an alignment.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error("Invalid alignment: {0}")]
    InvalidAlignment(#[from] AlignmentError),
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Parses a FASTA file and returns a validated Alignment.
///
/// # Arguments
///
/// * `path` - Path to the FASTA alignment
///
/// # Examples
///
/// ```no_run
/// use bluebase::fasta::parse_fasta_file;
///
/// let alignment = parse_fasta_file("aligned.fasta").unwrap();
/// println!("Loaded {} sequences", alignment.sequence_count());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> LoadResult<Alignment> {
    let file = File::open(&path)?;
    // Alignments are read whole; a large buffer keeps syscalls down
    let reader = BufReader::with_capacity(1024 * 1024, file);
    parse_fasta(reader)
}

/// Parses FASTA content from a reader.
pub fn parse_fasta<R: BufRead>(reader: R) -> LoadResult<Alignment> {
    let mut sequences = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_seq: Vec<u8> = Vec::new();
    let mut prev_seq_len: usize = 1000;
    let mut replaced = 0usize;

    for (idx, line_result) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line_result?;
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                prev_seq_len = current_seq.len();
                replaced += push_record(&mut sequences, id, std::mem::take(&mut current_seq));
            }

            // Identifier is everything before the first whitespace
            let id = header.split_whitespace().next().unwrap_or_default();
            if id.is_empty() {
                return Err(LoadError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            current_id = Some(id.to_string());
            // Rows of an alignment share one length
            current_seq = Vec::with_capacity(prev_seq_len);
        } else {
            if current_id.is_none() {
                return Err(LoadError::SequenceWithoutHeader(line_number));
            }

            if line.bytes().all(|b| !b.is_ascii_whitespace()) {
                current_seq.extend_from_slice(line.as_bytes());
            } else {
                current_seq.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
            }
        }
    }

    if let Some(id) = current_id {
        replaced += push_record(&mut sequences, id, current_seq);
    }

    if sequences.is_empty() {
        return Err(LoadError::EmptyFile);
    }

    if replaced > 0 {
        warn!(
            "{} symbols outside the nucleotide alphabet were read as gaps",
            replaced
        );
    }

    Ok(Alignment::new(sequences)?)
}

/// Parses FASTA content from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_fasta_str(content: &str) -> LoadResult<Alignment> {
    parse_fasta(content.as_bytes())
}

/// Stores a finished record and returns how many of its bytes fell back to gaps.
fn push_record(sequences: &mut Vec<Sequence>, id: String, data: Vec<u8>) -> usize {
    let unknown = data.iter().filter(|&&b| !is_known_symbol(b)).count();
    sequences.push(Sequence::from_bytes(id, data));
    unknown
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_simple_fasta() {
        let content = ">seq1\nACGT\n>seq2\nTGCA\n";
        let alignment = parse_fasta_str(content).unwrap();

        assert_eq!(alignment.sequence_count(), 2);
        assert_eq!(alignment.get(0).unwrap().id, "seq1");
        assert_eq!(alignment.get(0).unwrap().as_str(), "ACGT");
        assert_eq!(alignment.get(1).unwrap().id, "seq2");
        assert_eq!(alignment.get(1).unwrap().as_str(), "TGCA");
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let content = ">seq1\nACGT\nTGCA\nAAAA\n";
        let alignment = parse_fasta_str(content).unwrap();

        assert_eq!(alignment.sequence_count(), 1);
        assert_eq!(alignment.get(0).unwrap().as_str(), "ACGTTGCAAAAA");
    }

    #[test]
    fn test_parse_with_description() {
        let content = ">seq1 This is a description\nACGT\n";
        let alignment = parse_fasta_str(content).unwrap();

        assert_eq!(alignment.get(0).unwrap().id, "seq1");
    }

    #[test]
    fn test_parse_with_empty_lines_and_crlf() {
        let content = ">seq1\r\nACGT\r\n\r\n>seq2\n\nTGCA\n";
        let alignment = parse_fasta_str(content).unwrap();

        assert_eq!(alignment.sequence_count(), 2);
        assert_eq!(alignment.get(0).unwrap().as_str(), "ACGT");
        assert_eq!(alignment.get(1).unwrap().as_str(), "TGCA");
    }

    #[test]
    fn test_normalizes_case_and_dots() {
        let content = ">seq1\nac..gt\n>seq2\nAC-NGT\n";
        let alignment = parse_fasta_str(content).unwrap();

        assert_eq!(alignment.get(0).unwrap().as_str(), "AC--GT");
        assert_eq!(alignment.get(1).unwrap().as_str(), "AC-NGT");
    }

    #[test]
    fn test_unknown_symbols_become_gaps() {
        let alignment = parse_fasta_str(">seq1\nAC*GT\n").unwrap();
        assert_eq!(alignment.get(0).unwrap().as_str(), "AC-GT");
    }

    #[test]
    fn test_empty_file() {
        let result = parse_fasta_str("");
        assert!(matches!(result, Err(LoadError::EmptyFile)));

        let result = parse_fasta_str("\n\n  \n");
        assert!(matches!(result, Err(LoadError::EmptyFile)));
    }

    #[test]
    fn test_sequence_without_header() {
        let content = "ACGT\n>seq1\nTGCA\n";
        let result = parse_fasta_str(content);
        assert!(matches!(result, Err(LoadError::SequenceWithoutHeader(1))));
    }

    #[test]
    fn test_empty_identifier() {
        let result = parse_fasta_str(">\nACGT\n");
        assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
    }

    #[test]
    fn test_record_without_sequence() {
        let content = ">seq1\nACGT\n>seq2\n";
        let result = parse_fasta_str(content);
        assert!(matches!(
            result,
            Err(LoadError::InvalidAlignment(AlignmentError::EmptySequence(_)))
        ));
    }

    #[test]
    fn test_unequal_lengths_rejected() {
        let content = ">seq1\nACGT\n>seq2\nTG\n";
        let result = parse_fasta_str(content);
        assert!(matches!(
            result,
            Err(LoadError::InvalidAlignment(AlignmentError::UnequalLengths { .. }))
        ));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">a\nAT--GC\n>b\nATAAGC\n").unwrap();

        let alignment = parse_fasta_file(file.path()).unwrap();
        assert_eq!(alignment.sequence_count(), 2);
        assert_eq!(alignment.alignment_length(), 6);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_fasta_file(dir.path().join("absent.fasta"));
        assert!(matches!(result, Err(LoadError::IoError(_))));
    }
}
