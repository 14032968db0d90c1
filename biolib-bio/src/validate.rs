//! Per-record alphabet and structure checks

use crate::sequence::{Alphabet, SequenceRecord};
use serde::Serialize;
use std::fmt;

/// Which symbol classes a validator accepts beyond the core alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    pub allow_ambiguity: bool,
    pub allow_gaps: bool,
    pub require_non_empty: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            allow_ambiguity: true,
            allow_gaps: false,
            require_non_empty: true,
        }
    }
}

/// One problem found in a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    IllegalSymbol { position: usize, symbol: char },
    QualityLengthMismatch { sequence: usize, quality: usize },
    EmptySequence,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalSymbol { position, symbol } => {
                write!(f, "illegal symbol '{}' at position {}", symbol.escape_default(), position)
            }
            Self::QualityLengthMismatch { sequence, quality } => write!(
                f,
                "sequence length ({}) != quality length ({})",
                sequence, quality
            ),
            Self::EmptySequence => write!(f, "sequence is empty"),
        }
    }
}

/// Outcome of validating one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub id: String,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks records against one alphabet
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    alphabet: Alphabet,
    options: ValidationOptions,
}

impl Validator {
    pub fn new(alphabet: Alphabet, options: ValidationOptions) -> Self {
        Self { alphabet, options }
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Collect every violation in `record`; the record is not modified
    pub fn validate(&self, record: &SequenceRecord) -> ValidationReport {
        let mut violations = Vec::new();
        let sequence = record.sequence();

        if self.options.require_non_empty && sequence.is_empty() {
            violations.push(Violation::EmptySequence);
        }

        violations.extend(
            sequence
                .iter()
                .enumerate()
                .filter(|&(_, &symbol)| {
                    !self
                        .alphabet
                        .contains(symbol, self.options.allow_ambiguity, self.options.allow_gaps)
                })
                .map(|(position, &symbol)| Violation::IllegalSymbol {
                    position,
                    symbol: symbol as char,
                }),
        );

        if let Some(quality) = record.quality() {
            if quality.len() != sequence.len() {
                violations.push(Violation::QualityLengthMismatch {
                    sequence: sequence.len(),
                    quality: quality.len(),
                });
            }
        }

        ValidationReport {
            id: record.id().to_string(),
            violations,
        }
    }
}

/// Validate with the default options
pub fn validate(record: &SequenceRecord, alphabet: Alphabet) -> ValidationReport {
    Validator::new(alphabet, ValidationOptions::default()).validate(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{parse, FormatDescriptor};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn records(input: &str) -> Vec<SequenceRecord> {
        parse(Cursor::new(input.as_bytes().to_vec()), FormatDescriptor::fasta())
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_ambiguity_allowed_by_default() {
        let recs = records(">seq1\nACGT\n>seq2\nRRNA\n");
        for rec in &recs {
            assert!(validate(rec, Alphabet::Dna).is_valid());
        }
    }

    #[test]
    fn test_ambiguity_disabled_reports_positions() {
        let recs = records(">seq1\nACGT\n>seq2\nRRNA\n");
        let strict = Validator::new(
            Alphabet::Dna,
            ValidationOptions {
                allow_ambiguity: false,
                ..ValidationOptions::default()
            },
        );

        assert!(strict.validate(&recs[0]).is_valid());
        let report = strict.validate(&recs[1]);
        assert_eq!(report.id, "seq2");
        assert_eq!(
            report.violations,
            vec![
                Violation::IllegalSymbol { position: 0, symbol: 'R' },
                Violation::IllegalSymbol { position: 1, symbol: 'R' },
            ]
        );
    }

    #[test]
    fn test_lowercase_accepted() {
        let rec = SequenceRecord::new("lc", b"acgtn".to_vec());
        assert!(validate(&rec, Alphabet::Dna).is_valid());
    }

    #[test]
    fn test_empty_sequence() {
        let rec = SequenceRecord::new("e", Vec::new());
        assert_eq!(
            validate(&rec, Alphabet::Dna).violations,
            vec![Violation::EmptySequence]
        );

        let lenient = Validator::new(
            Alphabet::Dna,
            ValidationOptions {
                require_non_empty: false,
                ..ValidationOptions::default()
            },
        );
        assert!(lenient.validate(&rec).is_valid());
    }

    #[test]
    fn test_gaps_rejected_by_default() {
        let rec = SequenceRecord::new("aln", b"AC-GT".to_vec());
        let report = validate(&rec, Alphabet::Dna);
        assert_eq!(
            report.violations,
            vec![Violation::IllegalSymbol { position: 2, symbol: '-' }]
        );

        let with_gaps = Validator::new(
            Alphabet::Dna,
            ValidationOptions {
                allow_gaps: true,
                ..ValidationOptions::default()
            },
        );
        assert!(with_gaps.validate(&rec).is_valid());
    }

    #[test]
    fn test_collects_all_violations() {
        let rec = SequenceRecord::new("p", b"MKXZ9".to_vec());
        let report = validate(&rec, Alphabet::Protein);
        assert_eq!(
            report.violations,
            vec![Violation::IllegalSymbol { position: 4, symbol: '9' }]
        );

        // M and K are nucleotide ambiguity codes
        let report = validate(&rec, Alphabet::Dna);
        assert_eq!(report.violations.len(), 3);
    }

    #[test]
    fn test_report_serializes() {
        let rec = SequenceRecord::new("x", b"A!".to_vec());
        let json = serde_json::to_value(validate(&rec, Alphabet::Dna)).unwrap();
        assert_eq!(json["id"], "x");
        assert_eq!(json["violations"][0]["kind"], "illegal_symbol");
        assert_eq!(json["violations"][0]["position"], 1);
    }

    #[test]
    fn test_violation_display() {
        let v = Violation::IllegalSymbol { position: 3, symbol: 'Q' };
        assert_eq!(v.to_string(), "illegal symbol 'Q' at position 3");
    }
}
