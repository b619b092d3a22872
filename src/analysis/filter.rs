use log::debug;

use super::types::FilteredIndex;
use crate::error::{AnalysisError, AnalysisResult};
use crate::kmer::{KmerIndex, KmerTable};

/// Keep k-mers whose share of all positions is at least `threshold`.
///
/// Frequency is `sum(histogram[kmer]) / (N * (L - K + 1))`. Comparison is
/// inclusive. Returns fresh tables; per-offset counts and first-seen order of
/// the kept k-mers are unchanged.
pub fn filter_by_frequency(index: &KmerIndex, threshold: f64) -> AnalysisResult<FilteredIndex> {
    // also rejects NaN
    if !(0.0..=1.0).contains(&threshold) {
        return Err(AnalysisError::InvalidThreshold { threshold });
    }

    let total_positions = index.total_positions() as f64;

    let mut occurrences = KmerTable::new();
    let mut histogram = KmerTable::new();

    for (kmer, counts) in index.histogram().iter() {
        let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
        let frequency = total as f64 / total_positions;
        if frequency < threshold {
            continue;
        }
        if let Some(reads) = index.occurrences().get(kmer.as_bytes()) {
            occurrences.insert(kmer.clone(), reads.clone());
        }
        histogram.insert(kmer.clone(), counts.clone());
    }

    debug!(
        "{} of {} k-mers reach frequency {}",
        histogram.len(),
        index.distinct_kmers(),
        threshold
    );

    if histogram.is_empty() {
        return Err(AnalysisError::NoSurvivingKmers { threshold });
    }

    Ok(FilteredIndex {
        threshold,
        index: index.with_tables(occurrences, histogram),
    })
}
