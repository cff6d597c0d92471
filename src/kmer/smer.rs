// src/kmer/smer.rs
//! Sliding-window s-mer extraction over a 2-bit symbol stream.

use super::packed::decode_code;
use super::{SMER_LEN, SMER_MASK};

/// Rolling 2-bit s-mer accumulator.
///
/// The most recent symbol sits in the low two bits and everything above
/// `2 * SMER_LEN` bits is always zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingSmer {
    code: u64,
    filled: usize,
}

impl RollingSmer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift in one symbol, dropping the oldest once the window is full.
    #[inline(always)]
    pub fn roll(&mut self, symbol: u8) {
        self.code = ((self.code << 2) | (symbol & 0b11) as u64) & SMER_MASK;
        self.filled += 1;
    }

    /// True once at least `SMER_LEN` symbols have been rolled in.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.filled >= SMER_LEN
    }

    #[inline(always)]
    pub fn code(&self) -> u64 {
        self.code
    }
}

/// Iterator adapter turning symbols into s-mers.
///
/// Consumes every symbol and yields one s-mer per symbol from index
/// `SMER_LEN - 1` onwards, so `n` symbols give `n - (SMER_LEN - 1)` s-mers.
#[derive(Debug, Clone)]
pub struct SmerExtractor<I> {
    symbols: I,
    window: RollingSmer,
}

impl<I: Iterator<Item = u8>> SmerExtractor<I> {
    pub fn new(symbols: I) -> Self {
        Self {
            symbols,
            window: RollingSmer::new(),
        }
    }
}

impl<I: Iterator<Item = u8>> Iterator for SmerExtractor<I> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        for symbol in self.symbols.by_ref() {
            self.window.roll(symbol);
            if self.window.is_full() {
                return Some(self.window.code());
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = SMER_LEN.saturating_sub(self.window.filled);
        let (lo, hi) = self.symbols.size_hint();
        let adjust = |len: usize| len.saturating_sub(pending.saturating_sub(1));
        (adjust(lo), hi.map(adjust))
    }
}

/// Render a packed s-mer as bases, oldest symbol first.
pub fn decode_smer(code: u64) -> String {
    (0..SMER_LEN)
        .rev()
        .map(|i| decode_code(((code >> (2 * i)) & 0b11) as u8) as char)
        .collect()
}
