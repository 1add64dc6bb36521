//! # bluebase - Alignment Statistics
//!
//! Column statistics, gap statistics and blue base concordance for
//! nucleotide multiple sequence alignments.
//!
//! ## Architecture
//!
//! Data flows strictly forward, each stage reading the previous one's output:
//! - `fasta`: FASTA loading into a validated `model::Alignment`
//! - `boundary`: per-row split into leading-missing, core and trailing-missing zones
//! - `columns`: per-column counts, frequencies, consensus base and IUPAC code
//! - `gaps`: gap runs inside row core zones
//! - `bluebase`: concordance of every residue with its column consensus
//! - `report`: the per-column table and the summary artifacts
//! - `stats`: orchestration and error taxonomy
//!
//! `iupac` holds the symbol alphabet and the IUPAC code table shared by all stages.
//!
//! ```no_run
//! use bluebase::report::ReportPaths;
//! use bluebase::stats::write_statistics;
//!
//! let summary = write_statistics("aligned.fasta", &ReportPaths::from_prefix("out/sample")).unwrap();
//! println!("{} sequences", summary.sequence_count);
//! ```

pub mod bluebase;
pub mod boundary;
pub mod columns;
pub mod fasta;
pub mod gaps;
pub mod iupac;
pub mod model;
pub mod report;
pub mod stats;
