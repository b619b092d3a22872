use log::{debug, info};
use rayon::prelude::*;

use super::types::{KmerTable, ReadOffsets};
use crate::error::{AnalysisError, AnalysisResult};
use crate::io::SequenceRead;

/// k-mer -> read -> offsets
pub type OccurrenceTable = KmerTable<ReadOffsets>;

/// k-mer -> number of reads carrying it at each offset
pub type PositionalHistogram = KmerTable<Vec<u32>>;

/// Positional k-mer index over a read set of uniform length.
#[derive(Debug, Clone, PartialEq)]
pub struct KmerIndex {
    kmer_length: usize,
    read_length: usize,
    read_count: usize,
    occurrences: OccurrenceTable,
    histogram: PositionalHistogram,
}

impl KmerIndex {
    fn empty(kmer_length: usize, read_length: usize) -> Self {
        KmerIndex {
            kmer_length,
            read_length,
            read_count: 0,
            occurrences: KmerTable::new(),
            histogram: KmerTable::new(),
        }
    }

    /// Build an index from already-filtered structures, keeping the read set dimensions.
    pub(crate) fn with_tables(
        &self,
        occurrences: OccurrenceTable,
        histogram: PositionalHistogram,
    ) -> Self {
        KmerIndex {
            kmer_length: self.kmer_length,
            read_length: self.read_length,
            read_count: self.read_count,
            occurrences,
            histogram,
        }
    }

    fn add_read(&mut self, read_index: usize, sequence: &[u8]) {
        let width = self.positions_per_read();
        for (offset, window) in sequence.windows(self.kmer_length).enumerate() {
            self.occurrences
                .get_or_insert_with(window, ReadOffsets::new)
                .entry(read_index)
                .or_default()
                .insert(offset);
            self.histogram.get_or_insert_with(window, || vec![0; width])[offset] += 1;
        }
        self.read_count += 1;
    }

    /// Append `other` after `self`. Reads in `other` must come later in input order
    /// for first-seen order to match a sequential pass.
    fn merge(mut self, other: KmerIndex) -> Self {
        let width = self.positions_per_read();
        for (kmer, reads) in other.occurrences.into_iter_ordered() {
            self.occurrences
                .get_or_insert_with(kmer.as_bytes(), ReadOffsets::new)
                .extend(reads);
        }
        for (kmer, counts) in other.histogram.into_iter_ordered() {
            let merged = self
                .histogram
                .get_or_insert_with(kmer.as_bytes(), || vec![0; width]);
            for (slot, count) in merged.iter_mut().zip(counts) {
                *slot += count;
            }
        }
        self.read_count += other.read_count;
        self
    }

    pub fn kmer_length(&self) -> usize {
        self.kmer_length
    }

    pub fn read_length(&self) -> usize {
        self.read_length
    }

    pub fn read_count(&self) -> usize {
        self.read_count
    }

    /// Number of start offsets in a single read, L - K + 1.
    pub fn positions_per_read(&self) -> usize {
        self.read_length + 1 - self.kmer_length
    }

    /// Denominator of k-mer frequencies, N * (L - K + 1).
    pub fn total_positions(&self) -> usize {
        self.read_count * self.positions_per_read()
    }

    pub fn occurrences(&self) -> &OccurrenceTable {
        &self.occurrences
    }

    pub fn histogram(&self) -> &PositionalHistogram {
        &self.histogram
    }

    /// Per-offset counts of one k-mer, if indexed.
    pub fn histogram_of(&self, kmer: &[u8]) -> Option<&[u32]> {
        self.histogram.get(kmer).map(Vec::as_slice)
    }

    pub fn distinct_kmers(&self) -> usize {
        self.histogram.len()
    }
}

pub struct KmerIndexer {
    k: usize,
}

impl KmerIndexer {
    /// Create a new KmerIndexer with specified k-mer size
    pub fn new(k: usize) -> Self {
        KmerIndexer { k }
    }

    pub fn kmer_size(&self) -> usize {
        self.k
    }

    /// Index reads in parallel. Per-worker indexes are merged left to right,
    /// so the result is identical to [`KmerIndexer::index_sequential`].
    pub fn index(&self, reads: &[SequenceRead]) -> AnalysisResult<KmerIndex> {
        let read_length = self.validate(reads)?;
        info!(
            "Indexing {}-mers across {} reads of length {}",
            self.k,
            reads.len(),
            read_length
        );

        let index = reads
            .par_iter()
            .enumerate()
            .fold(
                || KmerIndex::empty(self.k, read_length),
                |mut local, (read_index, read)| {
                    local.add_read(read_index, read.sequence());
                    local
                },
            )
            .reduce(
                || KmerIndex::empty(self.k, read_length),
                KmerIndex::merge,
            );

        debug!(
            "Indexed {} distinct k-mers over {} positions",
            index.distinct_kmers(),
            index.total_positions()
        );
        Ok(index)
    }

    /// Single-threaded indexing pass.
    pub fn index_sequential(&self, reads: &[SequenceRead]) -> AnalysisResult<KmerIndex> {
        let read_length = self.validate(reads)?;
        let mut index = KmerIndex::empty(self.k, read_length);
        for (read_index, read) in reads.iter().enumerate() {
            index.add_read(read_index, read.sequence());
        }
        Ok(index)
    }

    /// Returns the shared read length after checking K and read lengths.
    fn validate(&self, reads: &[SequenceRead]) -> AnalysisResult<usize> {
        let first = reads.first().ok_or(AnalysisError::EmptyInput)?;
        let read_length = first.len();

        if self.k == 0 || self.k > read_length {
            return Err(AnalysisError::InvalidConfiguration {
                kmer_length: self.k,
                read_length,
            });
        }

        if let Some((read_index, read)) = reads
            .iter()
            .enumerate()
            .find(|(_, read)| read.len() != read_length)
        {
            return Err(AnalysisError::InconsistentReadLength {
                read_index,
                expected: read_length,
                found: read.len(),
            });
        }

        Ok(read_length)
    }
}
