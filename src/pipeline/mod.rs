// src/pipeline/mod.rs
//! Decode, extract, hash and store: the s-mer hashing pipeline.
//!
//! A [`Pipeline`] runs one packed sequence per invocation and moves through
//! `Idle -> Running -> Done | Failed`. Preconditions are checked before any
//! stage starts, so a failed precondition never touches the output buffer.
//! Terminal pipelines are not reused; build a fresh one per run.

pub mod batch;
mod dataflow;
mod sequential;
pub mod stages;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::kmer::{packed_len, smer_count, SMER_LEN};

pub use batch::hash_batch;

/// Queue depth of each stage boundary, matching the accelerator's stream depth.
pub const DEFAULT_QUEUE_DEPTH: usize = 1024;

/// How the four stages are scheduled. Both modes give identical output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One thread per stage, joined by bounded channels.
    #[default]
    Dataflow,
    /// All stages fused into one iterator chain on the calling thread.
    Sequential,
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dataflow" | "threaded" => Ok(ExecutionMode::Dataflow),
            "sequential" | "fused" => Ok(ExecutionMode::Sequential),
            other => Err(format!("unknown execution mode '{}'", other)),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Dataflow => f.write_str("dataflow"),
            ExecutionMode::Sequential => f.write_str("sequential"),
        }
    }
}

/// Configuration for a pipeline run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    pub mode: ExecutionMode,
    /// Capacity of each inter-stage queue (dataflow mode only)
    pub queue_depth: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Dataflow,
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

impl PipelineConfig {
    pub fn sequential() -> Self {
        Self {
            mode: ExecutionMode::Sequential,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    Idle,
    Running,
    Done,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Running => "running",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Check the `(sequence, n, output)` triple and return the s-mer count.
pub fn validate(sequence: &[u64], n: usize, output_capacity: usize) -> Result<usize> {
    let n_smers = smer_count(n).ok_or(PipelineError::InvalidLength { n, min: SMER_LEN })?;
    let words = packed_len(n);
    if sequence.len() < words {
        return Err(PipelineError::SequenceTooShort {
            required: words,
            capacity: sequence.len(),
        });
    }
    if output_capacity < n_smers {
        return Err(PipelineError::BufferTooSmall {
            required: n_smers,
            capacity: output_capacity,
        });
    }
    Ok(n_smers)
}

/// Single-use s-mer hashing pipeline.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    state: PipelineState,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Hash the first `n` symbols of `sequence` into `output[..n_smers]`.
    ///
    /// Slots of `output` past `n_smers` are left untouched.
    pub fn run(&mut self, sequence: &[u64], n: usize, output: &mut [u64]) -> Result<()> {
        if self.state != PipelineState::Idle {
            return Err(PipelineError::InvalidState { state: self.state });
        }
        self.state = PipelineState::Running;

        let result = self.execute(sequence, n, output);
        self.state = match result {
            Ok(()) => PipelineState::Done,
            Err(ref e) => {
                warn!("pipeline failed: {}", e);
                PipelineState::Failed
            }
        };
        result
    }

    /// Run on `sequence` and return a freshly allocated hash array.
    pub fn hash_sequence(&mut self, sequence: &[u64], n: usize) -> Result<Vec<u64>> {
        // short inputs get an empty buffer and fail in run()
        let mut output = vec![0u64; smer_count(n).unwrap_or(0)];
        self.run(sequence, n, &mut output)?;
        Ok(output)
    }

    fn execute(&self, sequence: &[u64], n: usize, output: &mut [u64]) -> Result<()> {
        if self.config.queue_depth == 0 {
            return Err(PipelineError::InvalidQueueDepth);
        }
        let n_smers = validate(sequence, n, output.len())?;
        let output = &mut output[..n_smers];

        debug!(
            "running {} pipeline over {} symbols ({} s-mers)",
            self.config.mode, n, n_smers
        );
        match self.config.mode {
            ExecutionMode::Dataflow => dataflow::run(sequence, n, output, self.config.queue_depth),
            ExecutionMode::Sequential => sequential::run(sequence, n, output),
        }
    }
}

/// Hash the first `n` symbols of `sequence` into `output` with a default pipeline.
pub fn process(sequence: &[u64], n: usize, output: &mut [u64]) -> Result<()> {
    Pipeline::default().run(sequence, n, output)
}
