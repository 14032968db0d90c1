//! Alphabet selection shared between configuration and the CLI

use serde::{Deserialize, Serialize};

/// Alphabet a validator checks records against
///
/// `Auto` defers the choice to content inspection of the first records in a
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum AlphabetKind {
    Dna,
    Rna,
    Protein,
    #[default]
    Auto,
}

impl std::fmt::Display for AlphabetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dna => write!(f, "dna"),
            Self::Rna => write!(f, "rna"),
            Self::Protein => write!(f, "protein"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_kind_serde() {
        let json = serde_json::to_string(&AlphabetKind::Protein).unwrap();
        assert_eq!(json, "\"protein\"");
        let back: AlphabetKind = serde_json::from_str("\"dna\"").unwrap();
        assert_eq!(back, AlphabetKind::Dna);
    }
}
