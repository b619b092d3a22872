/// One sequenced fragment with its decoded Phred quality scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRead {
    /// Full header line (identifier plus free text)
    description: String,
    sequence: Vec<u8>,
    quality: Vec<u8>,
}

impl SequenceRead {
    pub fn new<S: Into<String>>(description: S, sequence: Vec<u8>, quality: Vec<u8>) -> Self {
        SequenceRead {
            description: description.into(),
            sequence,
            quality,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// First whitespace-delimited token of the header.
    pub fn id(&self) -> &str {
        self.description
            .split_whitespace()
            .next()
            .unwrap_or_default()
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn quality(&self) -> &[u8] {
        &self.quality
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Arithmetic mean of the Phred scores, 0.0 for a read without qualities.
    pub fn mean_quality(&self) -> f64 {
        if self.quality.is_empty() {
            return 0.0;
        }
        let total: u64 = self.quality.iter().map(|&q| u64::from(q)).sum();
        total as f64 / self.quality.len() as f64
    }

    /// Copy of this read with `note` appended to the description.
    pub fn annotated(&self, note: &str) -> Self {
        let description = if self.description.is_empty() {
            note.to_string()
        } else {
            format!("{} {}", self.description, note)
        };
        SequenceRead {
            description,
            sequence: self.sequence.clone(),
            quality: self.quality.clone(),
        }
    }
}
