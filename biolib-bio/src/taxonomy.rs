//! Greengenes-style taxonomy strings and `<id>\t<taxonomy>` files.
//!
//! A full string names seven ranks in order, each taxon carrying its rank
//! prefix: `d__Bacteria; p__Firmicutes; c__Bacilli; o__; f__; g__; s__`.
//! Spaces after the semicolons are optional.

use crate::error::TaxonomyError;
use crate::formats::open_input;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

pub const RANK_SEPARATOR: char = ';';

/// The seven ranks of a Greengenes-style taxonomy, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Domain,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl Rank {
    pub const ALL: [Rank; 7] = [
        Rank::Domain,
        Rank::Phylum,
        Rank::Class,
        Rank::Order,
        Rank::Family,
        Rank::Genus,
        Rank::Species,
    ];

    /// Prefix that marks a taxon of this rank, e.g. `g__`
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Domain => "d__",
            Self::Phylum => "p__",
            Self::Class => "c__",
            Self::Order => "o__",
            Self::Family => "f__",
            Self::Genus => "g__",
            Self::Species => "s__",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Phylum => "phylum",
            Self::Class => "class",
            Self::Order => "order",
            Self::Family => "family",
            Self::Genus => "genus",
            Self::Species => "species",
        }
    }

    /// Position in [`Rank::ALL`] (0 = domain)
    pub fn depth(&self) -> usize {
        *self as usize
    }

    /// Rank named by a taxon's prefix, if it carries one
    pub fn of_taxon(taxon: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rank| taxon.starts_with(rank.prefix()))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Taxa of a taxonomy string in rank order, trimmed
pub fn taxa(taxonomy: &str) -> Vec<&str> {
    taxonomy.split(RANK_SEPARATOR).map(str::trim).collect()
}

/// Pair taxa with ranks by position; taxa past species are dropped
pub fn taxa_at_ranks(taxonomy: &str) -> Vec<(Rank, &str)> {
    Rank::ALL.into_iter().zip(taxa(taxonomy)).collect()
}

/// Whether the string names all seven ranks, each with its own prefix
pub fn check_full(taxonomy: &str) -> bool {
    let taxa = taxa(taxonomy);
    taxa.len() == Rank::ALL.len()
        && taxa
            .iter()
            .zip(Rank::ALL)
            .all(|(taxon, rank)| taxon.starts_with(rank.prefix()))
}

/// Insert bare prefixes for missing ranks.
///
/// Taxa must already be in rank order. A taxon is kept when it carries the
/// prefix of the rank being filled; otherwise that rank gets its bare prefix
/// and the taxon is tried against the next rank.
pub fn fill_missing_ranks(taxonomy: &str) -> String {
    let mut remaining = taxa(taxonomy).into_iter().peekable();
    let mut filled = Vec::with_capacity(Rank::ALL.len());

    for rank in Rank::ALL {
        match remaining.peek() {
            Some(taxon) if taxon.starts_with(rank.prefix()) => {
                filled.push(taxon.to_string());
                remaining.next();
            }
            _ => filled.push(rank.prefix().to_string()),
        }
    }

    filled.join(";")
}

/// Read `<id>\t<taxonomy>` lines into a map from id to taxonomy string.
///
/// Trailing whitespace and one trailing `;` are stripped from each string.
/// Blank lines are skipped. With `validate`, the first string that is not
/// [full](check_full) is an error.
pub fn read_taxonomy<R: BufRead>(
    reader: R,
    validate: bool,
) -> Result<HashMap<String, String>, TaxonomyError> {
    let mut taxonomy = HashMap::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let number = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let id = fields.next().unwrap_or_default();
        let tax_str = fields
            .next()
            .ok_or(TaxonomyError::MissingTaxonomy { line: number })?
            .trim_end();
        let tax_str = tax_str.strip_suffix(RANK_SEPARATOR).unwrap_or(tax_str);

        if validate && !check_full(tax_str) {
            return Err(TaxonomyError::InvalidTaxonomy {
                line: number,
                taxonomy: tax_str.to_string(),
            });
        }

        taxonomy.insert(id.to_string(), tax_str.to_string());
    }

    debug!("read {} taxonomy strings", taxonomy.len());
    Ok(taxonomy)
}

/// [`read_taxonomy`] from a file (or `-` for stdin), gzip allowed
pub fn read_taxonomy_file(
    path: &Path,
    validate: bool,
) -> Result<HashMap<String, String>, TaxonomyError> {
    read_taxonomy(open_input(path)?, validate)
}
