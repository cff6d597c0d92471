use std::time::{Duration, Instant};

use tracing::info;

use smer_hash::error::{PipelineError, Result};
use smer_hash::kmer::{smer_count, PackedSequence, SMER_LEN};
use smer_hash::pipeline::{Pipeline, PipelineConfig};
use smer_hash::stats::RunStats;

/// Hashes shown after the first run.
const PREVIEW: usize = 10;

/// Time `repeats` runs over `length` copies of `fill`.
///
/// Mirrors the accelerator host: one synthetic single-base buffer, the first
/// hashes printed in hex, then elapsed time and throughput.
pub fn benchmark_pipeline(
    length: usize,
    fill: u8,
    config: &PipelineConfig,
    repeats: usize,
) -> Result<RunStats> {
    let n_smers = smer_count(length).ok_or(PipelineError::InvalidLength {
        n: length,
        min: SMER_LEN,
    })?;
    info!(
        "Benchmarking {} pipeline: {} symbols of '{}', {} s-mers, {} run(s)",
        config.mode, length, fill as char, n_smers, repeats
    );

    let sequence = PackedSequence::filled(fill, length);
    let mut output = vec![0u64; n_smers];
    let mut stats = RunStats::new(config.mode);
    let mut elapsed = Duration::ZERO;

    for run in 0..repeats.max(1) {
        output.fill(0);
        let mut pipeline = Pipeline::new(config.clone());
        let start = Instant::now();
        pipeline.run(&sequence.words, sequence.len, &mut output)?;
        elapsed += start.elapsed();
        stats.record(sequence.len, n_smers);

        if run == 0 {
            println!("First {} hashes output:", PREVIEW.min(n_smers));
            for hash in output.iter().take(PREVIEW) {
                println!("{:x}", hash);
            }
        }
    }
    stats.finish(elapsed);

    println!("Pipeline execution time: {:.6} sec", stats.elapsed_secs);
    println!("Throughput: {:.6} GB/s", stats.throughput_gbps);
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_counts() {
        let stats = benchmark_pipeline(1024, b'A', &PipelineConfig::sequential(), 2).unwrap();
        assert_eq!(stats.sequences, 2);
        assert_eq!(stats.smers, 2 * 997);
    }

    #[test]
    fn test_benchmark_rejects_short() {
        let err = benchmark_pipeline(20, b'A', &PipelineConfig::default(), 1).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidLength { n: 20, .. }));
    }
}
