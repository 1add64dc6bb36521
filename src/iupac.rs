//! Nucleotide symbols and IUPAC code resolution.
//!
//! This module provides:
//! - The closed symbol alphabet of an alignment cell (bases, ambiguity codes, gap)
//! - Normalization of raw FASTA bytes into that alphabet
//! - The 16-entry table resolving a set of bases to one IUPAC symbol

/// The gap symbol after normalization.
pub const GAP: u8 = b'-';

/// The 11 IUPAC ambiguity codes counted in the "etc" category.
pub const AMBIGUITY_CODES: [u8; 11] = *b"YRWSKMDVHBN";

/// A canonical nucleotide.
///
/// Variants are declared in report order (A, T, G, C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nucleotide {
    A,
    T,
    G,
    C,
}

impl Nucleotide {
    /// All nucleotides in report order.
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::T, Nucleotide::G, Nucleotide::C];

    /// Parses an uppercase base.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Nucleotide::A),
            b'T' => Some(Nucleotide::T),
            b'G' => Some(Nucleotide::G),
            b'C' => Some(Nucleotide::C),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Nucleotide::A => b'A',
            Nucleotide::T => b'T',
            Nucleotide::G => b'G',
            Nucleotide::C => b'C',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }

    /// Index into per-base count arrays (report order).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bit used by [`BaseSet`].
    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl std::fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Category of a normalized alignment symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// One of A, T, G, C
    Base(Nucleotide),
    /// An ambiguity code, carrying its index in [`AMBIGUITY_CODES`]
    Ambiguous(usize),
    /// The gap symbol `-`
    Gap,
}

impl Symbol {
    /// Classifies a normalized byte.
    ///
    /// Bytes outside the alphabet fall back to [`Symbol::Gap`]; the loader
    /// already replaces them, so this only matters for hand-built data.
    pub fn classify(byte: u8) -> Self {
        if let Some(base) = Nucleotide::from_byte(byte) {
            return Symbol::Base(base);
        }
        match AMBIGUITY_CODES.iter().position(|&code| code == byte) {
            Some(idx) => Symbol::Ambiguous(idx),
            None => Symbol::Gap,
        }
    }
}

/// Returns true if the byte belongs to the alignment alphabet (case-insensitive).
pub fn is_known_symbol(byte: u8) -> bool {
    let upper = byte.to_ascii_uppercase();
    upper == GAP
        || upper == b'.'
        || Nucleotide::from_byte(upper).is_some()
        || AMBIGUITY_CODES.contains(&upper)
}

/// Normalizes a raw sequence byte: uppercases it, turns `.` into `-`,
/// and maps anything outside the alphabet to `-`.
pub fn normalize_symbol(byte: u8) -> u8 {
    let upper = byte.to_ascii_uppercase();
    if upper != b'.' && is_known_symbol(upper) {
        upper
    } else {
        GAP
    }
}

/// A distinct subset of {A, C, G, T}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseSet(u8);

impl BaseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, base: Nucleotide) {
        self.0 |= base.bit();
    }

    pub fn contains(&self, base: Nucleotide) -> bool {
        self.0 & base.bit() != 0
    }

    /// Lexicographically sorted concatenation of the bases present (e.g. "AGT").
    pub fn sorted_key(&self) -> String {
        [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T]
            .into_iter()
            .filter(|&base| self.contains(base))
            .map(Nucleotide::as_char)
            .collect()
    }
}

impl FromIterator<Nucleotide> for BaseSet {
    fn from_iter<I: IntoIterator<Item = Nucleotide>>(iter: I) -> Self {
        let mut set = BaseSet::new();
        for base in iter {
            set.insert(base);
        }
        set
    }
}

/// Sorted base key to IUPAC symbol, covering all 16 subsets of {A, C, G, T}.
const IUPAC_TABLE: [(&str, &str); 16] = [
    ("A", "A"),
    ("G", "G"),
    ("C", "C"),
    ("T", "T"),
    ("CT", "Y"),
    ("AG", "R"),
    ("AT", "W"),
    ("GT", "K"),
    ("CG", "S"),
    ("AC", "M"),
    ("AGT", "D"),
    ("ACG", "V"),
    ("ACT", "H"),
    ("CGT", "B"),
    ("", "None"),
    ("ACGT", "X"),
];

/// Resolves the IUPAC code for a set of bases.
pub fn iupac_code(bases: BaseSet) -> &'static str {
    let key = bases.sorted_key();
    IUPAC_TABLE
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, code)| *code)
        // The table is exhaustive over BaseSet
        .unwrap_or("None")
}
