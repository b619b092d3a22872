use log::{debug, info};

use super::extractor::extract_reads;
use super::filter::filter_by_frequency;
use super::selector::select_dominant;
use super::types::{AnalysisConfig, AnalysisOutcome, DominantKmer, FilteredIndex};
use crate::error::AnalysisResult;
use crate::io::SequenceRead;
use crate::kmer::{KmerIndex, KmerIndexer};

/// Drives the index -> filter -> select -> extract stages.
///
/// Each stage takes the previous stage's output by reference and returns a new
/// value. Re-indexing with another K means running the later stages again on
/// the new index.
pub struct KmerAnalyzer {
    config: AnalysisConfig,
    parallel: bool,
}

impl KmerAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        KmerAnalyzer {
            config,
            parallel: true,
        }
    }

    /// Index on the calling thread only
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn index(&self, reads: &[SequenceRead]) -> AnalysisResult<KmerIndex> {
        let indexer = KmerIndexer::new(self.config.kmer_length);
        let index = if self.parallel {
            indexer.index(reads)?
        } else {
            indexer.index_sequential(reads)?
        };
        info!(
            "Found {} distinct {}-mers over {} positions",
            index.distinct_kmers(),
            index.kmer_length(),
            index.total_positions()
        );
        Ok(index)
    }

    pub fn filter(&self, index: &KmerIndex) -> AnalysisResult<FilteredIndex> {
        let filtered = filter_by_frequency(index, self.config.frequency_threshold)?;
        info!(
            "{} k-mers reach frequency threshold {}",
            filtered.len(),
            self.config.frequency_threshold
        );
        Ok(filtered)
    }

    pub fn select(&self, filtered: &FilteredIndex) -> AnalysisResult<DominantKmer> {
        let dominant = select_dominant(filtered)?;
        info!(
            "Dominant k-mer {} at offset {} ({} reads)",
            dominant.kmer, dominant.offset, dominant.count
        );
        Ok(dominant)
    }

    pub fn extract(
        &self,
        dominant: &DominantKmer,
        filtered: &FilteredIndex,
        reads: &[SequenceRead],
    ) -> AnalysisResult<Vec<SequenceRead>> {
        let extracted = extract_reads(dominant, filtered, reads)?;
        debug!("Extracted {} of {} reads", extracted.len(), reads.len());
        Ok(extracted)
    }

    /// Run every stage over `reads`
    pub fn run(&self, reads: &[SequenceRead]) -> AnalysisResult<AnalysisOutcome> {
        let index = self.index(reads)?;
        self.run_from_index(&index, reads)
    }

    /// Run the stages after indexing, for callers that indexed separately
    pub fn run_from_index(
        &self,
        index: &KmerIndex,
        reads: &[SequenceRead],
    ) -> AnalysisResult<AnalysisOutcome> {
        let filtered = self.filter(index)?;
        let dominant = self.select(&filtered)?;
        let reads = self.extract(&dominant, &filtered, reads)?;
        Ok(AnalysisOutcome {
            filtered,
            dominant,
            reads,
        })
    }
}
