//! Symbol alphabets for nucleotide and protein sequences

use crate::sequence::SequenceRecord;
use biolib_core::AlphabetKind;
use serde::{Deserialize, Serialize};

const DNA_CORE: &[u8] = b"ACGTN";
const RNA_CORE: &[u8] = b"ACGUN";
// IUPAC nucleotide ambiguity codes (N is already in the core set)
const NUCLEOTIDE_AMBIGUITY: &[u8] = b"RYKMSWBDHV";
// 20 standard amino acids plus X (any)
const PROTEIN_CORE: &[u8] = b"ACDEFGHIKLMNPQRSTVWYX";
// B = D/N, Z = E/Q, J = I/L, U = selenocysteine, O = pyrrolysine, * = stop
const PROTEIN_AMBIGUITY: &[u8] = b"BZJUO*";
const GAPS: &[u8] = b"-.";

/// Valid symbol set for a sequence type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    Dna,
    Rna,
    Protein,
}

impl Alphabet {
    /// Map a configured alphabet; `Auto` has no fixed alphabet
    pub fn from_kind(kind: AlphabetKind) -> Option<Self> {
        match kind {
            AlphabetKind::Dna => Some(Self::Dna),
            AlphabetKind::Rna => Some(Self::Rna),
            AlphabetKind::Protein => Some(Self::Protein),
            AlphabetKind::Auto => None,
        }
    }

    pub fn core_symbols(&self) -> &'static [u8] {
        match self {
            Self::Dna => DNA_CORE,
            Self::Rna => RNA_CORE,
            Self::Protein => PROTEIN_CORE,
        }
    }

    pub fn ambiguity_symbols(&self) -> &'static [u8] {
        match self {
            Self::Dna | Self::Rna => NUCLEOTIDE_AMBIGUITY,
            Self::Protein => PROTEIN_AMBIGUITY,
        }
    }

    /// Case-insensitive membership test
    pub fn contains(&self, symbol: u8, allow_ambiguity: bool, allow_gaps: bool) -> bool {
        let upper = symbol.to_ascii_uppercase();
        self.core_symbols().contains(&upper)
            || (allow_ambiguity && self.ambiguity_symbols().contains(&upper))
            || (allow_gaps && is_gap(symbol))
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dna => write!(f, "DNA"),
            Self::Rna => write!(f, "RNA"),
            Self::Protein => write!(f, "protein"),
        }
    }
}

pub fn is_gap(symbol: u8) -> bool {
    GAPS.contains(&symbol)
}

/// Guess the alphabet of a stream from its first records.
///
/// A record counts as nucleotide when at least `required_fraction` of its
/// symbols are `ACGTUN` or gaps, and as protein when that fraction are amino
/// acids, `X` or gaps. The first nucleotide record decides the stream;
/// failing that, the first protein record does. Empty records are skipped and
/// at most `max_records` non-empty records are inspected.
pub fn infer_alphabet<'a, I>(records: I, required_fraction: f64, max_records: usize) -> Option<Alphabet>
where
    I: IntoIterator<Item = &'a SequenceRecord>,
{
    let mut protein_seen = false;

    for record in records
        .into_iter()
        .filter(|r| !r.is_empty())
        .take(max_records)
    {
        let seq = record.sequence();
        let total = seq.len() as f64;

        let mut nucleotides = 0usize;
        let mut uracil = 0usize;
        let mut thymine = 0usize;
        let mut amino_acids = 0usize;

        for &symbol in seq {
            let upper = symbol.to_ascii_uppercase();
            match upper {
                b'U' => uracil += 1,
                b'T' => thymine += 1,
                _ => {}
            }
            if b"ACGTUN".contains(&upper) || is_gap(symbol) {
                nucleotides += 1;
            }
            if PROTEIN_CORE.contains(&upper) || is_gap(symbol) {
                amino_acids += 1;
            }
        }

        if nucleotides as f64 / total >= required_fraction {
            return Some(if uracil > 0 && thymine == 0 {
                Alphabet::Rna
            } else {
                Alphabet::Dna
            });
        }
        if amino_acids as f64 / total >= required_fraction {
            protein_seen = true;
        }
    }

    protein_seen.then_some(Alphabet::Protein)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Alphabet::Dna, b'A', true)]
    #[case(Alphabet::Dna, b'a', true)]
    #[case(Alphabet::Dna, b'N', true)]
    #[case(Alphabet::Dna, b'U', false)]
    #[case(Alphabet::Dna, b'R', false)]
    #[case(Alphabet::Rna, b'u', true)]
    #[case(Alphabet::Rna, b'T', false)]
    #[case(Alphabet::Protein, b'W', true)]
    #[case(Alphabet::Protein, b'x', true)]
    #[case(Alphabet::Protein, b'B', false)]
    #[case(Alphabet::Protein, b'*', false)]
    fn test_core_membership(#[case] alphabet: Alphabet, #[case] symbol: u8, #[case] expected: bool) {
        assert_eq!(alphabet.contains(symbol, false, false), expected);
    }

    #[rstest]
    #[case(Alphabet::Dna, b'R')]
    #[case(Alphabet::Dna, b'y')]
    #[case(Alphabet::Rna, b'K')]
    #[case(Alphabet::Protein, b'B')]
    #[case(Alphabet::Protein, b'*')]
    fn test_ambiguity_codes(#[case] alphabet: Alphabet, #[case] symbol: u8) {
        assert!(!alphabet.contains(symbol, false, false));
        assert!(alphabet.contains(symbol, true, false));
    }

    #[test]
    fn test_gaps() {
        assert!(!Alphabet::Dna.contains(b'-', true, false));
        assert!(Alphabet::Dna.contains(b'-', false, true));
        assert!(Alphabet::Protein.contains(b'.', false, true));
    }

    #[test]
    fn test_from_kind() {
        assert_eq!(Alphabet::from_kind(AlphabetKind::Dna), Some(Alphabet::Dna));
        assert_eq!(Alphabet::from_kind(AlphabetKind::Auto), None);
    }

    #[test]
    fn test_infer_alphabet() {
        let dna = vec![SequenceRecord::new("a", b"ACGTACGTNN".to_vec())];
        assert_eq!(infer_alphabet(&dna, 0.95, 10), Some(Alphabet::Dna));

        let rna = vec![SequenceRecord::new("a", b"ACGUACGUUU".to_vec())];
        assert_eq!(infer_alphabet(&rna, 0.95, 10), Some(Alphabet::Rna));

        let protein = vec![SequenceRecord::new("p", b"MKLVFFEEPQWY".to_vec())];
        assert_eq!(infer_alphabet(&protein, 0.95, 10), Some(Alphabet::Protein));

        let junk = vec![SequenceRecord::new("j", b"1234567890".to_vec())];
        assert_eq!(infer_alphabet(&junk, 0.95, 10), None);

        let none: Vec<SequenceRecord> = Vec::new();
        assert_eq!(infer_alphabet(&none, 0.95, 10), None);
    }

    #[test]
    fn test_infer_alphabet_respects_sample_limit() {
        let records = vec![
            SequenceRecord::new("p1", b"MKLVFFEEPQ".to_vec()),
            SequenceRecord::new("empty", Vec::new()),
            SequenceRecord::new("d1", b"ACGTACGTAC".to_vec()),
        ];
        // the empty record does not use up the sample
        assert_eq!(infer_alphabet(&records, 0.95, 2), Some(Alphabet::Dna));
        assert_eq!(infer_alphabet(&records, 0.95, 1), Some(Alphabet::Protein));
    }
}
