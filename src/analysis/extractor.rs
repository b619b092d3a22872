use super::types::{DominantKmer, FilteredIndex};
use crate::error::{AnalysisError, AnalysisResult};
use crate::io::SequenceRead;

/// Reads carrying the dominant k-mer at its offset, in input order.
///
/// Each returned read is a copy whose description ends with
/// `quality_mean=<mean>` (two decimals). Sequence and quality are untouched.
/// `reads` must be the exact read set that was indexed.
pub fn extract_reads(
    dominant: &DominantKmer,
    filtered: &FilteredIndex,
    reads: &[SequenceRead],
) -> AnalysisResult<Vec<SequenceRead>> {
    let indexed = filtered.index().read_count();
    if reads.len() != indexed {
        return Err(AnalysisError::ReadSetMismatch {
            indexed,
            given: reads.len(),
        });
    }

    let Some(per_read) = filtered.index().occurrences().get(dominant.kmer.as_bytes()) else {
        return Ok(Vec::new());
    };

    Ok(per_read
        .iter()
        .filter(|(_, offsets)| offsets.contains(&dominant.offset))
        .map(|(&read_index, _)| &reads[read_index])
        .map(|read| read.annotated(&format!("quality_mean={:.2}", read.mean_quality())))
        .collect())
}
