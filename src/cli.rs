use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use anyhow::{anyhow, Result};

use kmer_hotspot::analysis::{AnalysisConfig, DEFAULT_FREQUENCY_THRESHOLD, DEFAULT_KMER_LENGTH};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find over-represented positional k-mers in FASTQ reads")]
pub struct Cli {
    /// FASTQ file to analyze. If omitted, the single *.fastq file in the current directory is used
    #[arg(value_parser = parse_fastq_path)]
    pub input: Option<PathBuf>,

    /// K-mer length (K > 0)
    #[arg(short, long = "kmer", default_value_t = DEFAULT_KMER_LENGTH, value_parser = parse_kmer_length)]
    pub kmer_length: usize,

    /// Frequency threshold (0 <= F <= 1)
    #[arg(short = 'F', long = "frequency", default_value_t = DEFAULT_FREQUENCY_THRESHOLD, value_parser = parse_frequency)]
    pub frequency: f64,

    /// FASTA file receiving the reads that carry the dominant k-mer
    #[arg(short, long, default_value = "dominant_reads.fasta")]
    pub output: PathBuf,

    /// Print the per-offset histogram of this k-mer (repeatable)
    #[arg(long = "histogram", value_name = "KMER")]
    pub histograms: Vec<String>,

    /// Write the histogram of every surviving k-mer to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "tsv")]
    pub report_format: ReportFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of threads to use
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Path to log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            kmer_length: self.kmer_length,
            frequency_threshold: self.frequency,
        }
    }

    /// The explicit input, or the only FASTQ file found in `dir`
    pub fn resolve_input(&self, dir: &Path) -> Result<PathBuf> {
        match &self.input {
            Some(path) => Ok(path.clone()),
            None => find_fastq_in_directory(dir),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum ReportFormat {
    Tsv,
    Json,
}

impl From<ReportFormat> for kmer_hotspot::io::ReportFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Tsv => Self::Tsv,
            ReportFormat::Json => Self::Json,
        }
    }
}

fn parse_kmer_length(value: &str) -> Result<usize, String> {
    let k: usize = value
        .parse()
        .map_err(|_| format!("`{}` is not a positive integer", value))?;
    if k == 0 {
        return Err("K must be a positive integer".to_string());
    }
    Ok(k)
}

fn parse_frequency(value: &str) -> Result<f64, String> {
    let f: f64 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if !(0.0..=1.0).contains(&f) {
        return Err("frequency threshold F must be between 0 and 1".to_string());
    }
    Ok(f)
}

fn parse_fastq_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.is_file() || !value.ends_with(".fastq") {
        return Err(format!("{} is not a valid FASTQ file", value));
    }
    Ok(path)
}

fn find_fastq_in_directory(dir: &Path) -> Result<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "fastq"))
        .collect();
    files.sort();

    match files.len() {
        0 => Err(anyhow!("No .fastq file found in {}", dir.display())),
        1 => Ok(files.remove(0)),
        _ => {
            let names: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
            Err(anyhow!(
                "Several .fastq files found, pass one explicitly: {}",
                names.join(", ")
            ))
        }
    }
}
