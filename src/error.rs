use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
/// Terminal failures of the k-mer analysis. None of them are retried; the caller
/// adjusts the configuration and re-runs from the indexing stage.
pub enum AnalysisError {
    #[error("K-mer length {kmer_length} is invalid for reads of length {read_length} (expected 1 <= K <= read length)")]
    /// Bad K for the read set
    InvalidConfiguration { kmer_length: usize, read_length: usize },
    #[error("Frequency threshold {threshold} is outside [0, 1]")]
    /// Threshold is not a fraction
    InvalidThreshold { threshold: f64 },
    #[error("No reads to analyze")]
    /// Zero reads were handed to the indexer
    EmptyInput,
    #[error("Read {read_index} has length {found} but reads are expected to share length {expected}")]
    /// Reads must all share the first read's length
    InconsistentReadLength {
        read_index: usize,
        expected: usize,
        found: usize,
    },
    #[error("No k-mer reaches the frequency threshold {threshold}; lower the threshold and retry")]
    /// Threshold too strict
    NoSurvivingKmers { threshold: f64 },
    #[error("Index was built over {indexed} reads but {given} reads were supplied")]
    /// Extraction was handed a different read set than the one indexed
    ReadSetMismatch { indexed: usize, given: usize },
    #[error("Filtered histogram is empty, nothing to select")]
    /// Selector was given no k-mers
    NoData,
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
