use crate::sequence::toolkit::count_nt;
use crate::sequence::SequenceRecord;
use serde::Serialize;

/// Length and composition statistics accumulated over a record stream.
///
/// Records are added one at a time, so a file never has to be held in memory;
/// only the per-record lengths are kept for N50/N90.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SequenceStats {
    pub total_sequences: usize,
    pub total_length: usize,
    pub min_length: usize,
    pub max_length: usize,
    /// G and C bases
    pub gc_bases: usize,
    /// A, C, G and T/U bases
    pub unambiguous_bases: usize,
    pub ambiguous_bases: usize,
    /// Sum of Phred scores over all bases of records with quality
    pub quality_sum: u64,
    pub quality_bases: usize,
    /// Length of each record, in stream order
    pub lengths: Vec<usize>,
}

/// Derived figures for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_sequences: usize,
    pub total_length: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub mean_length: f64,
    pub n50: usize,
    pub n90: usize,
    /// Percent G+C over unambiguous bases
    pub gc_percent: Option<f64>,
    pub ambiguous_bases: usize,
    pub mean_quality: Option<f64>,
}

impl SequenceStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the statistics
    pub fn add(&mut self, record: &SequenceRecord) {
        let len = record.len();
        if self.total_sequences == 0 {
            self.min_length = len;
            self.max_length = len;
        } else {
            self.min_length = self.min_length.min(len);
            self.max_length = self.max_length.max(len);
        }
        self.total_sequences += 1;
        self.total_length += len;
        self.lengths.push(len);

        let counts = count_nt(record.sequence());
        self.gc_bases += counts.g + counts.c;
        self.unambiguous_bases += counts.total();
        self.ambiguous_bases += len - counts.total();

        if let Some(quality) = record.quality() {
            self.quality_sum += quality.iter().map(|&q| q as u64).sum::<u64>();
            self.quality_bases += quality.len();
        }
    }

    /// Combine statistics gathered from separate streams
    pub fn merge(&mut self, other: &SequenceStats) {
        if other.total_sequences == 0 {
            return;
        }
        if self.total_sequences == 0 {
            self.min_length = other.min_length;
            self.max_length = other.max_length;
        } else {
            self.min_length = self.min_length.min(other.min_length);
            self.max_length = self.max_length.max(other.max_length);
        }
        self.total_sequences += other.total_sequences;
        self.total_length += other.total_length;
        self.gc_bases += other.gc_bases;
        self.unambiguous_bases += other.unambiguous_bases;
        self.ambiguous_bases += other.ambiguous_bases;
        self.quality_sum += other.quality_sum;
        self.quality_bases += other.quality_bases;
        self.lengths.extend_from_slice(&other.lengths);
    }

    pub fn mean_length(&self) -> f64 {
        if self.total_sequences == 0 {
            0.0
        } else {
            self.total_length as f64 / self.total_sequences as f64
        }
    }

    pub fn n50(&self) -> usize {
        self.nx(50)
    }

    pub fn n90(&self) -> usize {
        self.nx(90)
    }

    /// Length L such that records of length >= L hold `percentage` of all bases
    pub fn nx(&self, percentage: usize) -> usize {
        let mut sorted = self.lengths.clone();
        sorted.sort_unstable();
        calculate_nx(&sorted, self.total_length, percentage)
    }

    /// G+C fraction over unambiguous bases
    pub fn gc_content(&self) -> Option<f64> {
        if self.unambiguous_bases == 0 {
            None
        } else {
            Some(self.gc_bases as f64 / self.unambiguous_bases as f64)
        }
    }

    pub fn mean_quality(&self) -> Option<f64> {
        if self.quality_bases == 0 {
            None
        } else {
            Some(self.quality_sum as f64 / self.quality_bases as f64)
        }
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            total_sequences: self.total_sequences,
            total_length: self.total_length,
            min_length: self.min_length,
            max_length: self.max_length,
            mean_length: self.mean_length(),
            n50: self.n50(),
            n90: self.n90(),
            gc_percent: self.gc_content().map(|gc| gc * 100.0),
            ambiguous_bases: self.ambiguous_bases,
            mean_quality: self.mean_quality(),
        }
    }
}

impl<'a> FromIterator<&'a SequenceRecord> for SequenceStats {
    fn from_iter<I: IntoIterator<Item = &'a SequenceRecord>>(iter: I) -> Self {
        let mut stats = SequenceStats::new();
        for record in iter {
            stats.add(record);
        }
        stats
    }
}

/// `lengths` must be sorted ascending
fn calculate_nx(lengths: &[usize], total_length: usize, percentage: usize) -> usize {
    let target = total_length as f64 * percentage as f64 / 100.0;
    let mut cumulative = 0;

    for &length in lengths.iter().rev() {
        cumulative += length;
        if cumulative as f64 >= target {
            return length;
        }
    }

    0
}
