//! Sequence file format identifiers

use serde::{Deserialize, Serialize};

/// Text formats a sequence record can be read from or written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SequenceFormat {
    /// `>` header line followed by one or more sequence lines
    Fasta,
    /// `@` header, sequence, `+` separator and quality line
    Fastq,
}

impl SequenceFormat {
    /// Byte that opens every record of this format
    pub fn header_marker(&self) -> u8 {
        match self {
            Self::Fasta => b'>',
            Self::Fastq => b'@',
        }
    }

    /// Whether records of this format carry per-symbol quality scores
    pub fn carries_quality(&self) -> bool {
        matches!(self, Self::Fastq)
    }
}

impl std::fmt::Display for SequenceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fasta => write!(f, "FASTA"),
            Self::Fastq => write!(f, "FASTQ"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(SequenceFormat::Fasta.header_marker(), b'>');
        assert_eq!(SequenceFormat::Fastq.header_marker(), b'@');
        assert!(SequenceFormat::Fastq.carries_quality());
        assert!(!SequenceFormat::Fasta.carries_quality());
    }
}
