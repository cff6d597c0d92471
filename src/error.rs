//! Error type shared by every pipeline entry point.

use thiserror::Error;

/// Pipeline stage names, used when a stage breaks its length contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decoder,
    Extractor,
    Mixer,
    Writer,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Decoder => "decoder",
            Stage::Extractor => "extractor",
            Stage::Mixer => "mixer",
            Stage::Writer => "writer",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Fewer symbols than one s-mer needs.
    #[error("sequence length {n} is shorter than the s-mer length {min}")]
    InvalidLength { n: usize, min: usize },

    #[error("output buffer holds {capacity} hashes but {required} are required")]
    BufferTooSmall { required: usize, capacity: usize },

    #[error("packed sequence holds {capacity} words but {required} are required")]
    SequenceTooShort { required: usize, capacity: usize },

    #[error("{stage} stage handled {actual} items, expected {expected}")]
    LengthMismatch {
        stage: Stage,
        expected: usize,
        actual: usize,
    },

    #[error("{stage} stage panicked")]
    StagePanicked { stage: Stage },

    #[error("queue depth must be at least 1")]
    InvalidQueueDepth,

    /// The pipeline object already reached a terminal state.
    #[error("pipeline cannot run from the {state} state")]
    InvalidState { state: crate::pipeline::PipelineState },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
