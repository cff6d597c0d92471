// src/pipeline/dataflow.rs
//! Four-thread dataflow execution.
//!
//! Each stage runs on its own scoped thread. Stages are joined by bounded
//! single-producer/single-consumer channels, so a full queue blocks its
//! producer and an empty one blocks its consumer.

use std::thread;

use crossbeam::channel::bounded;
use tracing::debug;

use super::stages;
use crate::error::{PipelineError, Result, Stage};

/// Run all four stages concurrently. Inputs are already validated and
/// `output` is exactly `n_smers` long.
pub(crate) fn run(sequence: &[u64], n: usize, output: &mut [u64], queue_depth: usize) -> Result<()> {
    let n_smers = output.len();
    // bounded() allocates its full capacity; no queue ever holds more than
    // the items that will cross it
    let (symbol_tx, symbol_rx) = bounded::<u8>(queue_depth.min(n));
    let (smer_tx, smer_rx) = bounded::<u64>(queue_depth.min(n_smers));
    let (hash_tx, hash_rx) = bounded::<u64>(queue_depth.min(n_smers));

    debug!(
        "starting dataflow: {} symbols, {} s-mers, queue depth {}",
        n, n_smers, queue_depth
    );

    let results = thread::scope(|s| {
        let decoder = s.spawn(move || stages::unpack_sequence(sequence, n, &symbol_tx));
        let extractor = s.spawn(move || stages::generate_smers(&symbol_rx, &smer_tx, n));
        let mixer = s.spawn(move || stages::compute_hashes(&smer_rx, &hash_tx, n_smers));
        let writer = s.spawn(move || stages::store_hashes(hash_rx.iter(), output));

        [
            (Stage::Decoder, decoder.join()),
            (Stage::Extractor, extractor.join()),
            (Stage::Mixer, mixer.join()),
            (Stage::Writer, writer.join()),
        ]
    });

    collect_joins(results)
}

type Joined = thread::Result<Result<usize>>;

/// Reduce joined stage results to the first failure in stage order.
///
/// A panic outranks the mismatches it causes in its neighbours.
fn collect_joins<I>(results: I) -> Result<()>
where
    I: IntoIterator<Item = (Stage, Joined)>,
{
    let mut first_error = None;
    for (stage, joined) in results {
        match joined {
            Err(_) => return Err(PipelineError::StagePanicked { stage }),
            Ok(Err(e)) => {
                first_error.get_or_insert(e);
            }
            Ok(Ok(_)) => {}
        }
    }
    first_error.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmer::{hash_smer, pack_sequence, smer_count};
    use std::any::Any;

    fn panicked() -> Joined {
        let payload: Box<dyn Any + Send> = Box::new("stage blew up");
        Err(payload)
    }

    fn short(stage: Stage) -> Joined {
        Ok(Err(PipelineError::LengthMismatch {
            stage,
            expected: 10,
            actual: 3,
        }))
    }

    #[test]
    fn test_panic_outranks_neighbour_mismatch() {
        let results = vec![
            (Stage::Decoder, short(Stage::Decoder)),
            (Stage::Extractor, panicked()),
            (Stage::Mixer, short(Stage::Mixer)),
            (Stage::Writer, Ok(Ok(0))),
        ];
        assert_eq!(
            collect_joins(results),
            Err(PipelineError::StagePanicked {
                stage: Stage::Extractor
            })
        );
    }

    #[test]
    fn test_first_mismatch_in_stage_order() {
        let results = vec![
            (Stage::Decoder, Ok(Ok(10))),
            (Stage::Extractor, short(Stage::Extractor)),
            (Stage::Mixer, short(Stage::Mixer)),
            (Stage::Writer, Ok(Ok(0))),
        ];
        assert!(matches!(
            collect_joins(results),
            Err(PipelineError::LengthMismatch {
                stage: Stage::Extractor,
                ..
            })
        ));
    }

    #[test]
    fn test_all_stages_ok() {
        let results = vec![
            (Stage::Decoder, Ok(Ok(32))),
            (Stage::Extractor, Ok(Ok(5))),
            (Stage::Mixer, Ok(Ok(5))),
            (Stage::Writer, Ok(Ok(5))),
        ];
        assert_eq!(collect_joins(results), Ok(()));
    }

    #[test]
    fn test_huge_queue_depth_is_capped() {
        let words = pack_sequence(&[b'A'; 32]);
        let mut out = vec![0u64; 5];
        run(&words, 32, &mut out, 1usize << 40).unwrap();
        assert!(out.iter().all(|&h| h == hash_smer(0)));
    }

    #[test]
    fn test_depth_one_queues() {
        let bases: Vec<u8> = b"ACGT".iter().cycle().take(64).copied().collect();
        let words = pack_sequence(&bases);
        let mut out = vec![0u64; smer_count(64).unwrap()];
        run(&words, 64, &mut out, 1).unwrap();
        // period-4 input repeats every fourth window
        assert_eq!(out[0], out[4]);
        assert_ne!(out[0], out[1]);
    }

    #[test]
    fn test_input_longer_than_queue() {
        let words = pack_sequence(&vec![b'A'; 5000]);
        let mut out = vec![1u64; smer_count(5000).unwrap()];
        run(&words, 5000, &mut out, 16).unwrap();
        assert!(out.iter().all(|&h| h == hash_smer(0)));
    }
}
