// src/kmer/packed.rs
//! Byte-lane packed nucleotide sequences.
//!
//! A packed word carries eight symbols, one per byte. Symbol `i` lives in word
//! `i / 8`, byte lane `i % 8`, where lane 0 is the lowest byte. The byte holds
//! the ASCII base; decoding maps it to a 2-bit code:
//! - A = 00 (0)
//! - C = 01 (1)
//! - G = 10 (2)
//! - T = 11 (3)
//!
//! Any other byte (including `N`, lowercase bases and `0x00` padding) decodes
//! to the code for A.

/// Symbols carried by one packed word.
pub const SYMBOLS_PER_WORD: usize = 8;

static BASE_CODES: [u8; 256] = {
    let mut table = [0u8; 256];
    table[b'C' as usize] = 1;
    table[b'G' as usize] = 2;
    table[b'T' as usize] = 3;
    // A and everything else stay 0
    table
};

/// Map an ASCII base to its 2-bit code.
#[inline(always)]
pub fn encode_base(base: u8) -> u8 {
    BASE_CODES[base as usize]
}

/// Map a 2-bit code back to its base.
#[inline]
pub fn decode_code(code: u8) -> u8 {
    match code & 0b11 {
        0 => b'A',
        1 => b'C',
        2 => b'G',
        _ => b'T',
    }
}

/// Number of packed words needed for `n` symbols.
#[inline]
pub fn packed_len(n: usize) -> usize {
    n.div_ceil(SYMBOLS_PER_WORD)
}

/// Pack ASCII bases one per byte lane. Unused lanes of the last word are zero.
pub fn pack_sequence(bases: &[u8]) -> Vec<u64> {
    bases
        .chunks(SYMBOLS_PER_WORD)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u64, |word, (lane, &b)| word | ((b as u64) << (8 * lane)))
        })
        .collect()
}

/// Build a packed buffer of `n` copies of `base`.
pub fn fill_sequence(base: u8, n: usize) -> Vec<u64> {
    let full = u64::from_ne_bytes([base; SYMBOLS_PER_WORD]);
    let mut words = vec![full; packed_len(n)];
    let tail = n % SYMBOLS_PER_WORD;
    if tail != 0 {
        if let Some(last) = words.last_mut() {
            *last &= (1u64 << (8 * tail)) - 1;
        }
    }
    words
}

/// A packed buffer together with its symbol count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedSequence {
    pub words: Vec<u64>,
    pub len: usize,
}

impl PackedSequence {
    pub fn from_bases(bases: &[u8]) -> Self {
        Self {
            words: pack_sequence(bases),
            len: bases.len(),
        }
    }

    pub fn filled(base: u8, len: usize) -> Self {
        Self {
            words: fill_sequence(base, len),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the packed buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    pub fn symbols(&self) -> SymbolDecoder<'_> {
        SymbolDecoder::new(&self.words, self.len)
    }
}

/// Lazily unpacks the first `n` symbols of a packed buffer, in order.
///
/// Stops early if `words` runs out before `n` symbols; the pipeline rejects
/// such buffers before building a decoder.
#[derive(Debug, Clone)]
pub struct SymbolDecoder<'a> {
    words: &'a [u64],
    idx: usize,
    n: usize,
}

impl<'a> SymbolDecoder<'a> {
    pub fn new(words: &'a [u64], n: usize) -> Self {
        let n = n.min(words.len() * SYMBOLS_PER_WORD);
        Self { words, idx: 0, n }
    }
}

impl Iterator for SymbolDecoder<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.idx >= self.n {
            return None;
        }
        let word = self.words[self.idx / SYMBOLS_PER_WORD];
        let lane = self.idx % SYMBOLS_PER_WORD;
        self.idx += 1;
        Some(encode_base((word >> (8 * lane)) as u8))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.n - self.idx;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SymbolDecoder<'_> {}
