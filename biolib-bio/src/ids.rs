//! Identifier bookkeeping: duplicate and shared ids, id-based extraction

use crate::sequence::SequenceRecord;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// Ids seen in one stream, with the ones that occurred more than once
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    seen: HashSet<String>,
    /// Same ids as `duplicates`, for constant-time membership
    repeated: HashSet<String>,
    duplicates: Vec<String>,
}

impl IdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id; returns false if it was already present
    pub fn insert(&mut self, id: &str) -> bool {
        if self.seen.insert(id.to_string()) {
            return true;
        }
        if self.repeated.insert(id.to_string()) {
            self.duplicates.push(id.to_string());
        }
        false
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Repeated ids, in order of their first repeat
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.seen
    }
}

/// Ids that occur more than once among `records`
pub fn duplicate_ids<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a SequenceRecord>,
{
    let mut index = IdIndex::new();
    for record in records {
        index.insert(record.id());
    }
    index.duplicates
}

/// Ids present in both of a pair of named inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedIds {
    pub first: String,
    pub second: String,
    /// Sorted
    pub ids: Vec<String>,
}

/// Compare every pair of inputs and report the ids they have in common
pub fn shared_ids(inputs: &[(String, IdIndex)]) -> Vec<SharedIds> {
    let mut shared = Vec::new();
    for (i, (first, left)) in inputs.iter().enumerate() {
        for (second, right) in &inputs[i + 1..] {
            let mut ids: Vec<String> = left.ids().intersection(right.ids()).cloned().collect();
            if ids.is_empty() {
                continue;
            }
            ids.sort();
            shared.push(SharedIds {
                first: first.clone(),
                second: second.clone(),
                ids,
            });
        }
    }
    shared
}

/// Which records to keep when extracting
#[derive(Debug, Clone)]
pub enum IdFilter {
    /// Exact id membership
    Ids(HashSet<String>),
    /// Regex matched against the full header (id and description)
    Pattern(Regex),
}

impl IdFilter {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Ids(ids.into_iter().map(Into::into).collect())
    }

    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Parse an id list: one id per line, first whitespace token, `#` comments
    pub fn from_id_list(text: &str) -> Self {
        Self::from_ids(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .filter_map(|line| line.split_whitespace().next())
                .map(|id| id.trim_start_matches('>')),
        )
    }

    pub fn matches(&self, record: &SequenceRecord) -> bool {
        match self {
            Self::Ids(ids) => ids.contains(record.id()),
            Self::Pattern(re) => re.is_match(&record.header()),
        }
    }
}

/// Keep only the records accepted by `filter`, preserving order
pub fn extract<'f, I>(records: I, filter: &'f IdFilter) -> impl Iterator<Item = SequenceRecord> + 'f
where
    I: IntoIterator<Item = SequenceRecord>,
    I::IntoIter: 'f,
{
    records.into_iter().filter(move |record| filter.matches(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records(ids: &[&str]) -> Vec<SequenceRecord> {
        ids.iter()
            .map(|id| SequenceRecord::new(*id, b"ACGT".to_vec()))
            .collect()
    }

    fn index(ids: &[&str]) -> IdIndex {
        let mut index = IdIndex::new();
        for id in ids {
            index.insert(id);
        }
        index
    }

    #[test]
    fn test_duplicate_ids() {
        let recs = records(&["a", "b", "a", "c", "b", "a"]);
        assert_eq!(duplicate_ids(&recs), vec!["a".to_string(), "b".to_string()]);
        assert!(duplicate_ids(&records(&["x", "y"])).is_empty());
    }

    #[test]
    fn test_index_insert() {
        let mut idx = IdIndex::new();
        assert!(idx.insert("a"));
        assert!(!idx.insert("a"));
        assert_eq!(idx.len(), 1);
        assert!(idx.contains("a"));
    }

    #[test]
    fn test_many_repeats_listed_once() {
        let mut idx = IdIndex::new();
        for round in 0..1000 {
            idx.insert(&format!("id{}", round % 50));
        }
        assert_eq!(idx.len(), 50);
        assert_eq!(idx.duplicates().len(), 50);
        assert_eq!(idx.duplicates()[0], "id0");
        assert_eq!(idx.duplicates()[49], "id49");
    }

    #[test]
    fn test_shared_ids() {
        let inputs = vec![
            ("bin1".to_string(), index(&["c1", "c2", "c3"])),
            ("bin2".to_string(), index(&["c4", "c2"])),
            ("bin3".to_string(), index(&["c3", "c2"])),
        ];
        let shared = shared_ids(&inputs);
        assert_eq!(
            shared,
            vec![
                SharedIds {
                    first: "bin1".into(),
                    second: "bin2".into(),
                    ids: vec!["c2".into()],
                },
                SharedIds {
                    first: "bin1".into(),
                    second: "bin3".into(),
                    ids: vec!["c2".into(), "c3".into()],
                },
                SharedIds {
                    first: "bin2".into(),
                    second: "bin3".into(),
                    ids: vec!["c2".into()],
                },
            ]
        );
    }

    #[test]
    fn test_extract_by_ids() {
        let filter = IdFilter::from_ids(["b", "d"]);
        let kept: Vec<_> = extract(records(&["a", "b", "c", "d"]), &filter)
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(kept, vec!["b", "d"]);
    }

    #[test]
    fn test_extract_by_pattern() {
        let recs = vec![
            SequenceRecord::new("s1", b"A".to_vec()).with_description("Escherichia coli"),
            SequenceRecord::new("s2", b"A".to_vec()).with_description("Bacillus subtilis"),
            SequenceRecord::new("coli_3", b"A".to_vec()),
        ];
        let filter = IdFilter::pattern("coli").unwrap();
        let kept: Vec<_> = extract(recs, &filter).map(|r| r.id().to_string()).collect();
        assert_eq!(kept, vec!["s1", "coli_3"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(IdFilter::pattern("(unclosed").is_err());
    }

    #[test]
    fn test_id_list_parsing() {
        let filter = IdFilter::from_id_list("# wanted\n>a extra\n\n  b\n");
        let recs = records(&["a", "b", "c"]);
        let kept: Vec<_> = recs.iter().filter(|r| filter.matches(r)).map(|r| r.id()).collect();
        assert_eq!(kept, vec!["a", "b"]);
    }
}
