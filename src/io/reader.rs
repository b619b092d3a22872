use std::path::{Path, PathBuf};
use anyhow::{anyhow, Result, Context};
use needletail::errors::ParseErrorKind;
use needletail::parse_fastx_file;
use log::{info, warn};

use super::types::SequenceRead;

/// Phred+33 offset used by Sanger/Illumina 1.8+ FASTQ
const PHRED_OFFSET: u8 = 33;

/// Loads FASTQ records fully into memory, preserving file order
pub struct FastqReader {
    path: PathBuf,
}

impl FastqReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FastqReader {
            path: path.as_ref().to_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record of the file
    pub fn read_all(&self) -> Result<Vec<SequenceRead>> {
        let mut reads = Vec::new();
        self.process_all(|read| {
            reads.push(read);
            Ok(())
        })
        .with_context(|| format!("Failed to process file: {}", self.path.display()))?;
        Ok(reads)
    }

    /// Process each record of the file in order
    pub fn process_all<F>(&self, mut callback: F) -> Result<()>
    where
        F: FnMut(SequenceRead) -> Result<()>,
    {
        info!("Processing file: {}", self.path.display());

        let mut reader = match parse_fastx_file(&self.path) {
            Ok(reader) => reader,
            Err(e) if e.kind == ParseErrorKind::EmptyFile => {
                warn!("File {} contains no records", self.path.display());
                return Ok(());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open file: {}", self.path.display()))
            }
        };

        let mut num_sequences = 0;
        while let Some(record) = reader.next() {
            let record = record.with_context(|| "Failed to parse sequence record")?;
            let description = String::from_utf8_lossy(record.id()).into_owned();

            let quality = record
                .qual()
                .ok_or_else(|| anyhow!("Record '{}' has no quality scores; FASTQ input is required", description))?
                .iter()
                .map(|&q| q.saturating_sub(PHRED_OFFSET))
                .collect();

            callback(SequenceRead::new(description, record.seq().into_owned(), quality))?;
            num_sequences += 1;
        }

        info!("Processed {} sequences from {}", num_sequences, self.path.display());
        Ok(())
    }
}
