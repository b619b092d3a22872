mod cli;

use anyhow::{anyhow, Result, Context};
use clap::Parser;
use crossbeam::channel::{self, RecvTimeoutError};
use log::{info, warn};
use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::cli::Cli;
use kmer_hotspot::analysis::{AnalysisConfig, KmerAnalyzer};
use kmer_hotspot::io::{self, FastqReader, SequenceRead};
use kmer_hotspot::kmer::KmerIndex;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(log_file) = &cli.log_file {
        let file = File::create(log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    // Set up parallel processing
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to initialize thread pool")?;
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let input = cli.resolve_input(&cwd)?;
    let config = cli.analysis_config();
    let analyzer = KmerAnalyzer::new(config);

    let (reads, index) = load_and_index(&input, &analyzer)?;
    let outcome = analyzer.run_from_index(&index, &reads)?;

    println!(
        "The most frequent k-mer is '{}' at position {} ({} reads).",
        outcome.dominant.kmer, outcome.dominant.offset, outcome.dominant.count
    );

    let stdout = std::io::stdout();
    for kmer in &cli.histograms {
        match outcome.filtered.histogram_of(kmer.as_bytes()) {
            Some(counts) => io::write_kmer_histogram(kmer, counts, stdout.lock())?,
            None => warn!("K-mer {} did not pass the frequency filter", kmer),
        }
    }

    if let Some(report) = &cli.report {
        let file = File::create(report)
            .with_context(|| format!("Failed to create report file: {}", report.display()))?;
        io::write_histogram_report(&outcome.filtered, cli.report_format.into(), file)?;
        info!("Histogram report written to {}", report.display());
    }

    io::write_fasta_file(&outcome.reads, &cli.output)?;
    info!(
        "Wrote {} reads to {}",
        outcome.reads.len(),
        cli.output.display()
    );

    Ok(())
}

/// Load and index on a worker thread while this thread reports progress.
fn load_and_index(input: &Path, analyzer: &KmerAnalyzer) -> Result<(Vec<SequenceRead>, KmerIndex)> {
    let config: &AnalysisConfig = analyzer.config();
    info!(
        "Analyzing {} with k={} and frequency threshold {}",
        input.display(),
        config.kmer_length,
        config.frequency_threshold
    );

    let (sender, receiver) = channel::bounded(1);
    let started = Instant::now();

    crossbeam::scope(|scope| {
        scope.spawn(move |_| {
            let result = FastqReader::new(input).read_all().and_then(|reads| {
                let index = analyzer.index(&reads)?;
                Ok((reads, index))
            });
            // Only fails if the receiver is gone, in which case nobody needs the result.
            let _ = sender.send(result);
        });

        loop {
            match receiver.recv_timeout(PROGRESS_INTERVAL) {
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) => {
                    info!("Computing k-mers... ({:.1}s)", started.elapsed().as_secs_f64());
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(anyhow!("K-mer indexing worker exited without a result"));
                }
            }
        }
    })
    .map_err(|_| anyhow!("K-mer indexing worker panicked"))?
}
