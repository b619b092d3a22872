pub(crate) mod types;
pub(crate) mod reader;
pub(crate) mod writer;

pub use types::SequenceRead;
pub use reader::FastqReader;
pub use writer::{
    write_fasta, write_fasta_file, write_histogram_report, write_kmer_histogram, ReportFormat,
};
