use super::types::{DominantKmer, FilteredIndex};
use crate::error::{AnalysisError, AnalysisResult};

/// Find the (k-mer, offset) cell with the highest count.
///
/// Scans k-mers in first-seen order and offsets in ascending order; only a
/// strictly greater count replaces the current best, so the first maximum wins.
pub fn select_dominant(filtered: &FilteredIndex) -> AnalysisResult<DominantKmer> {
    let mut best: Option<DominantKmer> = None;

    for (kmer, counts) in filtered.index().histogram().iter() {
        for (offset, &count) in counts.iter().enumerate() {
            if best.as_ref().map_or(true, |b| count > b.count) {
                best = Some(DominantKmer {
                    kmer: kmer.clone(),
                    offset,
                    count,
                });
            }
        }
    }

    best.ok_or(AnalysisError::NoData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::filter_by_frequency;
    use crate::io::SequenceRead;
    use crate::kmer::KmerIndexer;

    fn filtered(sequences: &[&str], k: usize, threshold: f64) -> FilteredIndex {
        let reads: Vec<SequenceRead> = sequences
            .iter()
            .map(|s| SequenceRead::new("r", s.as_bytes().to_vec(), vec![20; s.len()]))
            .collect();
        let index = KmerIndexer::new(k).index(&reads).unwrap();
        filter_by_frequency(&index, threshold).unwrap()
    }

    #[test]
    fn test_tie_goes_to_first_seen_kmer() {
        // AAA@0 and ATT@2 both reach 2; AAA is seen first
        let dominant = select_dominant(&filtered(&["AAATT", "AATTT", "AAATT"], 3, 0.1)).unwrap();
        assert_eq!(dominant.kmer.sequence(), "AAA");
        assert_eq!(dominant.offset, 0);
        assert_eq!(dominant.count, 2);
    }

    #[test]
    fn test_tie_within_kmer_goes_to_lowest_offset() {
        let dominant = select_dominant(&filtered(&["AAAA"], 2, 0.0)).unwrap();
        assert_eq!(dominant.kmer.sequence(), "AA");
        assert_eq!(dominant.offset, 0);
        assert_eq!(dominant.count, 1);
    }

    #[test]
    fn test_strict_maximum_wins() {
        let dominant =
            select_dominant(&filtered(&["GATTACA", "CATTACA", "TATTACG"], 3, 0.0)).unwrap();
        assert_eq!(dominant.kmer.sequence(), "ATT");
        assert_eq!(dominant.offset, 1);
        assert_eq!(dominant.count, 3);
    }

    #[test]
    fn test_selection_is_reproducible() {
        let a = select_dominant(&filtered(&["ACGTACGT", "TTACGTAA", "ACGTTTTT"], 4, 0.0)).unwrap();
        let b = select_dominant(&filtered(&["ACGTACGT", "TTACGTAA", "ACGTTTTT"], 4, 0.0)).unwrap();
        assert_eq!(a, b);
    }
}
