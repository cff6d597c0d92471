// src/pipeline/sequential.rs
//! Fused single-threaded execution: the four stages as one iterator chain.

use super::stages;
use crate::error::Result;
use crate::kmer::{HashMixer, SmerExtractor, SymbolDecoder};

pub(crate) fn run(sequence: &[u64], n: usize, output: &mut [u64]) -> Result<()> {
    let hashes = HashMixer::new(SmerExtractor::new(SymbolDecoder::new(sequence, n)));
    stages::store_hashes(hashes, output).map(|_| ())
}
