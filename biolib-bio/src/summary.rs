use serde::Serialize;
use std::fmt;
use std::ops::AddAssign;

/// Record counts for one run over one or more streams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Records the parser yielded successfully
    pub processed: usize,
    pub passed: usize,
    pub failed_validation: usize,
    /// Malformed units skipped by the parser
    pub parse_errors: usize,
    /// Records the writer could not convert
    pub write_skipped: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing was skipped or rejected
    pub fn is_clean(&self) -> bool {
        self.failed_validation == 0 && self.parse_errors == 0 && self.write_skipped == 0
    }
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.passed += other.passed;
        self.failed_validation += other.failed_validation;
        self.parse_errors += other.parse_errors;
        self.write_skipped += other.write_skipped;
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} passed, {} failed validation, {} parse errors, {} not written",
            self.processed, self.passed, self.failed_validation, self.parse_errors, self.write_skipped
        )
    }
}
