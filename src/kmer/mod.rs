// src/kmer/mod.rs
//! S-mer primitives: packed decoding, sliding-window extraction and mixing.

pub mod mix;
pub mod packed;
pub mod smer;

pub use mix::{hash_smer, mix64, unmix64, HashMixer};
pub use packed::{fill_sequence, pack_sequence, packed_len, PackedSequence, SymbolDecoder};
pub use smer::{decode_smer, RollingSmer, SmerExtractor};

/// Symbols per s-mer.
pub const SMER_LEN: usize = 28;

/// Bits used by one packed s-mer.
pub const SMER_BITS: u32 = 2 * SMER_LEN as u32;

/// Low `SMER_BITS` bits set.
pub const SMER_MASK: u64 = mask_right(SMER_BITS);

/// Mask of the low `bits` bits; saturates at a full word.
#[inline]
pub const fn mask_right(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Number of s-mers in a sequence of `n` symbols, or `None` when `n < SMER_LEN`.
#[inline]
pub fn smer_count(n: usize) -> Option<usize> {
    n.checked_sub(SMER_LEN - 1).filter(|&count| count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(SMER_MASK, 0x00ff_ffff_ffff_ffff);
        assert_eq!(mask_right(64), u64::MAX);
        assert_eq!(mask_right(0), 0);
    }

    #[test]
    fn test_smer_count_boundaries() {
        assert_eq!(smer_count(0), None);
        assert_eq!(smer_count(SMER_LEN - 1), None);
        assert_eq!(smer_count(SMER_LEN), Some(1));
        assert_eq!(smer_count(100), Some(73));
    }
}
