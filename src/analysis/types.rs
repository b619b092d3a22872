use crate::io::SequenceRead;
use crate::kmer::{Kmer, KmerIndex};

/// Default k-mer length
pub const DEFAULT_KMER_LENGTH: usize = 7;

/// Default minimum k-mer frequency
pub const DEFAULT_FREQUENCY_THRESHOLD: f64 = 0.00142;

/// Values consumed by the analysis. Callers validate them before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Length of the k-mers to index
    pub kmer_length: usize,
    /// Minimum fraction of all positions a k-mer must occupy (0.0 to 1.0)
    pub frequency_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            kmer_length: DEFAULT_KMER_LENGTH,
            frequency_threshold: DEFAULT_FREQUENCY_THRESHOLD,
        }
    }
}

/// Index restricted to the k-mers that reached the frequency threshold
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredIndex {
    pub(crate) threshold: f64,
    pub(crate) index: KmerIndex,
}

impl FilteredIndex {
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn index(&self) -> &KmerIndex {
        &self.index
    }

    /// Surviving k-mers in first-seen order
    pub fn kmers(&self) -> impl Iterator<Item = &Kmer> {
        self.index.histogram().keys()
    }

    /// Per-offset counts of a surviving k-mer
    pub fn histogram_of(&self, kmer: &[u8]) -> Option<&[u32]> {
        self.index.histogram_of(kmer)
    }

    pub fn len(&self) -> usize {
        self.index.distinct_kmers()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The (k-mer, offset) cell with the highest histogram count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominantKmer {
    pub kmer: Kmer,
    pub offset: usize,
    pub count: u32,
}

/// Everything produced by a full run
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub filtered: FilteredIndex,
    pub dominant: DominantKmer,
    /// Reads carrying the dominant k-mer at its offset, annotated with their mean quality
    pub reads: Vec<SequenceRead>,
}
