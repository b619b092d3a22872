use std::fs::File;
use std::io::Write;
use std::path::Path;
use anyhow::{Result, Context};
use bio::io::fasta;
use serde::Serialize;

use super::types::SequenceRead;
use crate::analysis::FilteredIndex;

/// Histogram report layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Tsv,
    Json,
}

/// One k-mer row of the histogram report
#[derive(Debug, Serialize)]
struct HistogramRow<'a> {
    kmer: String,
    total: u64,
    counts: &'a [u32],
}

/// Write reads as FASTA, header = annotated description
pub fn write_fasta<W: Write>(reads: &[SequenceRead], writer: W) -> Result<()> {
    let mut fasta_writer = fasta::Writer::new(writer);
    for read in reads {
        let (id, desc) = split_header(read.description());
        fasta_writer
            .write(id, desc, read.sequence())
            .with_context(|| format!("Failed to write record {}", id))?;
    }
    fasta_writer.flush()?;
    Ok(())
}

pub fn write_fasta_file<P: AsRef<Path>>(reads: &[SequenceRead], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_fasta(reads, file)
}

/// Write the filtered positional histogram of every surviving k-mer
pub fn write_histogram_report<W: Write>(
    filtered: &FilteredIndex,
    format: ReportFormat,
    mut writer: W,
) -> Result<()> {
    let rows: Vec<HistogramRow> = filtered
        .index()
        .histogram()
        .iter()
        .map(|(kmer, counts)| HistogramRow {
            kmer: kmer.sequence(),
            total: counts.iter().map(|&c| u64::from(c)).sum(),
            counts,
        })
        .collect();

    match format {
        ReportFormat::Tsv => {
            let width = filtered.index().positions_per_read();
            let header: Vec<String> = (0..width).map(|p| format!("pos_{}", p)).collect();
            writeln!(writer, "kmer\ttotal\t{}", header.join("\t"))?;
            for row in &rows {
                let counts: Vec<String> = row.counts.iter().map(u32::to_string).collect();
                writeln!(writer, "{}\t{}\t{}", row.kmer, row.total, counts.join("\t"))?;
            }
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write a single k-mer's per-offset counts as `offset\tcount` lines
pub fn write_kmer_histogram<W: Write>(kmer: &str, counts: &[u32], mut writer: W) -> Result<()> {
    writeln!(writer, "# Occurrences of k-mer {}", kmer)?;
    writeln!(writer, "offset\tcount")?;
    for (offset, count) in counts.iter().enumerate() {
        writeln!(writer, "{}\t{}", offset, count)?;
    }
    Ok(())
}

fn split_header(description: &str) -> (&str, Option<&str>) {
    match description.split_once(char::is_whitespace) {
        Some((id, rest)) => {
            let rest = rest.trim_start();
            (id, if rest.is_empty() { None } else { Some(rest) })
        }
        None => (description, None),
    }
}
