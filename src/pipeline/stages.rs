// src/pipeline/stages.rs
//! The four pipeline stages, written against bounded channels.
//!
//! Every stage reads and writes an exact item count. A channel that closes
//! early, or a peer that stops reading, surfaces as a `LengthMismatch` for
//! the stage that noticed it.

use crossbeam::channel::{Receiver, Sender};
use tracing::debug;

use crate::error::{PipelineError, Result, Stage};
use crate::kmer::{hash_smer, RollingSmer, SymbolDecoder};

fn mismatch(stage: Stage, expected: usize, actual: usize) -> PipelineError {
    PipelineError::LengthMismatch {
        stage,
        expected,
        actual,
    }
}

/// Unpack `n` symbols from `sequence` into `output`.
pub fn unpack_sequence(sequence: &[u64], n: usize, output: &Sender<u8>) -> Result<usize> {
    let mut sent = 0;
    for symbol in SymbolDecoder::new(sequence, n) {
        output
            .send(symbol)
            .map_err(|_| mismatch(Stage::Decoder, n, sent))?;
        sent += 1;
    }
    if sent != n {
        return Err(mismatch(Stage::Decoder, n, sent));
    }
    debug!("decoder emitted {} symbols", sent);
    Ok(sent)
}

/// Consume `n` symbols and emit one s-mer per symbol once the window is full.
pub fn generate_smers(input: &Receiver<u8>, output: &Sender<u64>, n: usize) -> Result<usize> {
    let mut window = RollingSmer::new();
    let mut emitted = 0;
    for consumed in 0..n {
        let symbol = input
            .recv()
            .map_err(|_| mismatch(Stage::Extractor, n, consumed))?;
        window.roll(symbol);
        if window.is_full() {
            output
                .send(window.code())
                .map_err(|_| mismatch(Stage::Extractor, n, consumed))?;
            emitted += 1;
        }
    }
    debug!("extractor emitted {} s-mers", emitted);
    Ok(emitted)
}

/// Mix `n_smers` s-mers 1:1.
pub fn compute_hashes(input: &Receiver<u64>, output: &Sender<u64>, n_smers: usize) -> Result<usize> {
    for i in 0..n_smers {
        let smer = input
            .recv()
            .map_err(|_| mismatch(Stage::Mixer, n_smers, i))?;
        output
            .send(hash_smer(smer))
            .map_err(|_| mismatch(Stage::Mixer, n_smers, i))?;
    }
    debug!("mixer emitted {} hashes", n_smers);
    Ok(n_smers)
}

/// Write hashes into `output` from slot 0, exactly `output.len()` of them.
///
/// Pulls nothing from `hashes` once `output` is full.
pub fn store_hashes<I>(hashes: I, output: &mut [u64]) -> Result<usize>
where
    I: IntoIterator<Item = u64>,
{
    let expected = output.len();
    let mut written = 0;
    for (slot, hash) in output.iter_mut().zip(hashes) {
        *slot = hash;
        written += 1;
    }
    if written != expected {
        return Err(mismatch(Stage::Writer, expected, written));
    }
    debug!("writer stored {} hashes", written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmer::{pack_sequence, SMER_LEN};
    use crossbeam::channel::bounded;

    #[test]
    fn test_store_exact() {
        let mut out = [0u64; 3];
        assert_eq!(store_hashes(vec![7, 8, 9], &mut out).unwrap(), 3);
        assert_eq!(out, [7, 8, 9]);
    }

    #[test]
    fn test_store_short_input() {
        let mut out = [0u64; 3];
        let err = store_hashes(vec![7], &mut out).unwrap_err();
        assert_eq!(
            err,
            PipelineError::LengthMismatch {
                stage: Stage::Writer,
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn test_store_leaves_extra_items() {
        let mut out = [0u64; 2];
        let mut source = vec![1u64, 2, 3].into_iter();
        store_hashes(source.by_ref(), &mut out).unwrap();
        assert_eq!(source.next(), Some(3));
    }

    #[test]
    fn test_extractor_reports_early_close() {
        let (tx, rx) = bounded(64);
        let (smer_tx, _smer_rx) = bounded(64);
        for _ in 0..10 {
            tx.send(1u8).unwrap();
        }
        drop(tx);
        let err = generate_smers(&rx, &smer_tx, SMER_LEN).unwrap_err();
        assert_eq!(
            err,
            PipelineError::LengthMismatch {
                stage: Stage::Extractor,
                expected: SMER_LEN,
                actual: 10
            }
        );
    }

    #[test]
    fn test_decoder_reports_truncated_buffer() {
        let words = pack_sequence(b"ACGTACGT");
        let (tx, rx) = bounded(64);
        let err = unpack_sequence(&words, 12, &tx).unwrap_err();
        assert_eq!(
            err,
            PipelineError::LengthMismatch {
                stage: Stage::Decoder,
                expected: 12,
                actual: 8
            }
        );
        assert_eq!(rx.len(), 8);
    }

    #[test]
    fn test_decoder_reports_closed_consumer() {
        let words = pack_sequence(b"ACGTACGT");
        let (tx, rx) = bounded(1);
        drop(rx);
        assert!(matches!(
            unpack_sequence(&words, 8, &tx),
            Err(PipelineError::LengthMismatch { stage: Stage::Decoder, actual: 0, .. })
        ));
    }
}
