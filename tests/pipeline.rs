use std::fs::{self, File};
use std::io::Write;

use anyhow::Result;
use kmer_hotspot::analysis::{AnalysisConfig, KmerAnalyzer};
use kmer_hotspot::io::{write_fasta_file, write_histogram_report, FastqReader, ReportFormat};
use kmer_hotspot::AnalysisError;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn write_fastq(path: &std::path::Path, records: &[(&str, &str, &str)]) -> Result<()> {
    let mut file = File::create(path)?;
    for (header, sequence, quality) in records {
        writeln!(file, "@{}\n{}\n+\n{}", header, sequence, quality)?;
    }
    Ok(())
}

#[test]
fn test_fastq_to_fasta() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("reads.fastq");
    write_fastq(
        &input,
        &[
            ("r0 run=1", "AAATT", "IIIII"),
            ("r1 run=1", "AATTT", "+++++"),
            ("r2 run=1", "AAATT", "5555?"),
        ],
    )?;

    let reads = FastqReader::new(&input).read_all()?;
    let outcome = KmerAnalyzer::new(AnalysisConfig {
        kmer_length: 3,
        frequency_threshold: 0.1,
    })
    .run(&reads)?;

    assert_eq!(outcome.dominant.kmer.sequence(), "AAA");
    assert_eq!(outcome.dominant.offset, 0);
    assert_eq!(outcome.dominant.count, 2);

    let output = dir.path().join("out.fasta");
    write_fasta_file(&outcome.reads, &output)?;
    assert_eq!(
        fs::read_to_string(&output)?,
        ">r0 run=1 quality_mean=40.00\nAAATT\n>r2 run=1 quality_mean=22.00\nAAATT\n"
    );
    Ok(())
}

#[test]
fn test_adapter_at_fixed_offset_is_found() -> Result<()> {
    let adapter = "AGATCGGA";
    let backgrounds = [
        "CTGACTTGCAGTCCATGACT",
        "GTCCTAGCATGCATTCAGGA",
        "TTGCACCGTAACGTTGACCA",
        "ACGGTTCAAGCTGCATGTCA",
        "CATGCATCGGTACCATGGTT",
        "GGATCCTTAAGCGCTACGAT",
    ];
    let records: Vec<(String, String, String)> = backgrounds
        .iter()
        .enumerate()
        .map(|(i, bg)| {
            let sequence = if i % 2 == 0 {
                format!("{}{}", &bg[..10], adapter) + &bg[18..]
            } else {
                bg.to_string()
            };
            (format!("read{}", i), sequence, "I".repeat(20))
        })
        .collect();

    let dir = tempdir()?;
    let input = dir.path().join("adapters.fastq");
    let borrowed: Vec<(&str, &str, &str)> = records
        .iter()
        .map(|(h, s, q)| (h.as_str(), s.as_str(), q.as_str()))
        .collect();
    write_fastq(&input, &borrowed)?;

    let reads = FastqReader::new(&input).read_all()?;
    let outcome = KmerAnalyzer::new(AnalysisConfig {
        kmer_length: 8,
        frequency_threshold: 0.0,
    })
    .run(&reads)?;

    assert_eq!(outcome.dominant.kmer.sequence(), adapter);
    assert_eq!(outcome.dominant.offset, 10);
    assert_eq!(outcome.dominant.count, 3);
    let ids: Vec<&str> = outcome.reads.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["read0", "read2", "read4"]);

    let mut report = Vec::new();
    write_histogram_report(&outcome.filtered, ReportFormat::Tsv, &mut report)?;
    let report = String::from_utf8(report)?;
    let adapter_row = report
        .lines()
        .find(|line| line.starts_with(adapter))
        .unwrap();
    assert!(adapter_row.starts_with("AGATCGGA\t3\t"));
    Ok(())
}

#[test]
fn test_strict_threshold_fails() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("reads.fastq");
    write_fastq(
        &input,
        &[("r0", "AAATT", "IIIII"), ("r1", "AATTT", "IIIII"), ("r2", "AAATT", "IIIII")],
    )?;

    let reads = FastqReader::new(&input).read_all()?;
    let err = KmerAnalyzer::new(AnalysisConfig {
        kmer_length: 3,
        frequency_threshold: 1.0,
    })
    .run(&reads)
    .unwrap_err();
    assert_eq!(err, AnalysisError::NoSurvivingKmers { threshold: 1.0 });

    let err = KmerAnalyzer::new(AnalysisConfig {
        kmer_length: 6,
        frequency_threshold: 0.0,
    })
    .run(&reads)
    .unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InvalidConfiguration {
            kmer_length: 6,
            read_length: 5
        }
    );
    Ok(())
}

#[test]
fn test_empty_fastq_is_empty_input() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("empty.fastq");
    File::create(&input)?;

    let reads = FastqReader::new(&input).read_all()?;
    assert_eq!(reads.len(), 0);

    let err = KmerAnalyzer::new(AnalysisConfig::default())
        .run(&reads)
        .unwrap_err();
    assert_eq!(err, AnalysisError::EmptyInput);
    Ok(())
}

#[test]
fn test_mixed_read_lengths_fail() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("mixed.fastq");
    write_fastq(&input, &[("r0", "ACGT", "IIII"), ("r1", "ACG", "III")])?;

    let reads = FastqReader::new(&input).read_all()?;
    let err = KmerAnalyzer::new(AnalysisConfig {
        kmer_length: 2,
        frequency_threshold: 0.0,
    })
    .run(&reads)
    .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InconsistentReadLength {
            read_index: 1,
            expected: 4,
            found: 3
        }
    ));
    Ok(())
}
