use std::error::Error;
use std::io;
use std::time::Instant;

use tracing::{info, warn};

use smer_hash::io::fasta::read_fasta;
use smer_hash::io::hashes::{HashFormat, HashWriter};
use smer_hash::kmer::{smer_count, PackedSequence, SMER_LEN};
use smer_hash::pipeline::{hash_batch, PipelineConfig};
use smer_hash::stats::RunStats;

pub struct HashOptions {
    pub input: String,
    pub output: Option<String>,
    pub format: HashFormat,
    pub config: PipelineConfig,
    pub preview: usize,
}

/// Hash every record of `opts.input`, writing hash arrays in record order.
pub fn run_hash(opts: &HashOptions) -> Result<RunStats, Box<dyn Error>> {
    info!("Reading sequences from {}", opts.input);
    let records = read_fasta(&opts.input)?;

    let mut stats = RunStats::new(opts.config.mode);
    let mut ids = Vec::with_capacity(records.len());
    let mut packed = Vec::with_capacity(records.len());
    for record in &records {
        if record.bases.len() < SMER_LEN {
            warn!(
                "Skipping {}: {} bases is shorter than the s-mer length {}",
                record.id,
                record.bases.len(),
                SMER_LEN
            );
            stats.skipped += 1;
            continue;
        }
        ids.push(record.id.as_str());
        packed.push(PackedSequence::from_bases(&record.bases));
    }

    let start = Instant::now();
    let results = hash_batch(&packed, &opts.config);
    let elapsed = start.elapsed();

    let mut writer = match &opts.output {
        Some(path) => Some(HashWriter::create(path, opts.format)?),
        None => None,
    };

    for ((id, sequence), result) in ids.iter().zip(&packed).zip(results) {
        let hashes = result?;
        debug_assert_eq!(Some(hashes.len()), smer_count(sequence.len));
        stats.record(sequence.len, hashes.len());
        if let Some(w) = writer.as_mut() {
            w.write_record(id, &hashes)?;
        }
        if stats.sequences == 1 && opts.preview > 0 {
            println!("First {} hashes of {}:", opts.preview.min(hashes.len()), id);
            for hash in hashes.iter().take(opts.preview) {
                println!("{:016x}", hash);
            }
        }
    }
    stats.finish(elapsed);

    if let Some(w) = writer {
        w.finish()?;
        info!("Wrote {} hash arrays to {}", stats.sequences, opts.output.as_deref().unwrap_or("-"));
    }

    info!(
        "Hashed {} s-mers from {} sequences ({} skipped) in {:.3}s",
        stats.smers, stats.sequences, stats.skipped, stats.elapsed_secs
    );
    Ok(stats)
}

pub fn print_stats(stats: &RunStats) -> io::Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    println!("{}", json);
    Ok(())
}
