pub(crate) mod types;
pub(crate) mod analyzer;
pub(crate) mod filter;
pub(crate) mod selector;
pub(crate) mod extractor;

pub use types::{
    AnalysisConfig, AnalysisOutcome, DominantKmer, FilteredIndex, DEFAULT_FREQUENCY_THRESHOLD,
    DEFAULT_KMER_LENGTH,
};
pub use analyzer::KmerAnalyzer;
pub use filter::filter_by_frequency;
pub use selector::select_dominant;
pub use extractor::extract_reads;
