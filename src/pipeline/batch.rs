// src/pipeline/batch.rs
//! Parallel hashing of many independent sequences.

use rayon::prelude::*;
use tracing::info;

use super::{Pipeline, PipelineConfig};
use crate::error::Result;
use crate::kmer::PackedSequence;

/// Hash every record with its own pipeline, in parallel on the rayon pool.
///
/// Results come back in input order. Sequential mode is usually the better
/// fit here since rayon already provides the parallelism.
pub fn hash_batch(records: &[PackedSequence], config: &PipelineConfig) -> Vec<Result<Vec<u64>>> {
    info!(
        "Hashing {} sequences on {} threads ({} mode)",
        records.len(),
        rayon::current_num_threads(),
        config.mode
    );
    records
        .par_iter()
        .map(|record| Pipeline::new(config.clone()).hash_sequence(&record.words, record.len))
        .collect()
}
