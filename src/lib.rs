//! Streaming s-mer hashing over 2-bit packed DNA.
//!
//! A packed sequence flows through four stages: the decoder unpacks byte-lane
//! symbols, the extractor slides a 28-symbol window, the mixer applies an
//! invertible 64-bit mix and the writer stores hashes in input order.
//!
//! ```
//! use smer_hash::kmer::{hash_smer, PackedSequence};
//! use smer_hash::pipeline::process;
//!
//! let seq = PackedSequence::filled(b'A', 32);
//! let mut out = vec![0u64; 5];
//! process(&seq.words, seq.len, &mut out).unwrap();
//! assert!(out.iter().all(|&h| h == hash_smer(0)));
//! ```

pub mod error;
pub mod io;
pub mod kmer;
pub mod pipeline;
pub mod stats;

pub use error::{PipelineError, Stage};
pub use pipeline::{process, ExecutionMode, Pipeline, PipelineConfig, PipelineState};
