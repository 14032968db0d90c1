use crate::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One biological sequence with its metadata.
///
/// Records are immutable once built: fields are private and the builder
/// methods consume `self`. Quality scores are decoded Phred values, one per
/// symbol; a record with quality always has `quality.len() == sequence.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RecordParts")]
pub struct SequenceRecord {
    id: String,
    description: Option<String>,
    sequence: Vec<u8>,
    quality: Option<Vec<u8>>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            description: None,
            sequence: sequence.into(),
            quality: None,
        }
    }

    /// Attach a description; an empty string clears it
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// Attach decoded Phred scores, one per sequence symbol
    pub fn with_quality(mut self, quality: impl Into<Vec<u8>>) -> Result<Self, RecordError> {
        let quality = quality.into();
        if quality.len() != self.sequence.len() {
            return Err(RecordError::QualityLengthMismatch {
                sequence: self.sequence.len(),
                quality: quality.len(),
            });
        }
        self.quality = Some(quality);
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn quality(&self) -> Option<&[u8]> {
        self.quality.as_deref()
    }

    pub fn has_quality(&self) -> bool {
        self.quality.is_some()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Header text without the format marker: `id` or `id description`
    pub fn header(&self) -> String {
        match &self.description {
            Some(desc) => format!("{} {}", self.id, desc),
            None => self.id.clone(),
        }
    }

    /// Mean Phred score, if the record carries quality
    pub fn mean_quality(&self) -> Option<f64> {
        match &self.quality {
            Some(q) if !q.is_empty() => {
                Some(q.iter().map(|&v| v as f64).sum::<f64>() / q.len() as f64)
            }
            _ => None,
        }
    }
}

/// Unchecked field values; deserialization goes through the builders
#[derive(Deserialize)]
struct RecordParts {
    id: String,
    #[serde(default)]
    description: Option<String>,
    sequence: Vec<u8>,
    #[serde(default)]
    quality: Option<Vec<u8>>,
}

impl TryFrom<RecordParts> for SequenceRecord {
    type Error = RecordError;

    fn try_from(parts: RecordParts) -> Result<Self, Self::Error> {
        let mut record = SequenceRecord::new(parts.id, parts.sequence);
        if let Some(description) = parts.description {
            record = record.with_description(description);
        }
        match parts.quality {
            Some(quality) => record.with_quality(quality),
            None => Ok(record),
        }
    }
}

impl fmt::Display for SequenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.sequence))
    }
}
