//! Positional k-mer analysis of FASTQ reads.
//!
//! Reads are indexed by (k-mer, offset), k-mers below a frequency threshold are
//! dropped, and the reads carrying the most common (k-mer, offset) pair are
//! extracted. A k-mer that sits at the same offset in many reads usually points
//! to adapter contamination or another library artifact.

pub mod analysis;
pub mod error;
pub mod io;
pub mod kmer;

pub use analysis::{AnalysisConfig, AnalysisOutcome, DominantKmer, FilteredIndex, KmerAnalyzer};
pub use error::{AnalysisError, AnalysisResult};
pub use io::{FastqReader, SequenceRead};
pub use kmer::{Kmer, KmerIndex, KmerIndexer};
