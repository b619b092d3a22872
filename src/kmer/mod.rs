pub(crate) mod types;
pub(crate) mod indexer;

pub use types::{Kmer, KmerTable, ReadOffsets};
pub use indexer::{KmerIndex, KmerIndexer, OccurrenceTable, PositionalHistogram};
