// src/kmer/mix.rs
//! Invertible 64-bit integer mix for packed s-mers.
//!
//! The forward mix is a fixed sequence of add-shift and xor-shift steps,
//! each re-masked to a low-bit mask `M = 2^w - 1`. Every add-shift step is a
//! multiplication by an odd constant modulo `2^w`, and every xor-shift is
//! undone by xoring in successive shifts, so the mix is a bijection on
//! `[0, 2^w)` and [`unmix64`] recovers the input.
//!
//! Not a cryptographic hash.

use super::SMER_MASK;

/// Multiplicative inverse of an odd `a` modulo `2^64` (Newton iteration).
const fn inverse_mod_2_64(a: u64) -> u64 {
    let mut x = a;
    let mut i = 0;
    // 3 correct bits to start, doubling each round
    while i < 5 {
        x = x.wrapping_mul(2u64.wrapping_sub(a.wrapping_mul(x)));
        i += 1;
    }
    x
}

const INV_STEP1: u64 = inverse_mod_2_64((1 << 21) - 1);
const INV_STEP3: u64 = inverse_mod_2_64(1 + (1 << 3) + (1 << 8));
const INV_STEP5: u64 = inverse_mod_2_64(1 + (1 << 2) + (1 << 4));
const INV_STEP7: u64 = inverse_mod_2_64(1 + (1 << 31));

/// Mix `key` under `mask`. Operation order, shift amounts and masking points
/// are fixed; the unmasked xor-shift steps rely on the previous step's mask.
#[inline(always)]
pub fn mix64(key: u64, mask: u64) -> u64 {
    let mut key = (!key).wrapping_add(key << 21) & mask;
    key ^= key >> 24;
    key = key.wrapping_add(key << 3).wrapping_add(key << 8) & mask;
    key ^= key >> 14;
    key = key.wrapping_add(key << 2).wrapping_add(key << 4) & mask;
    key ^= key >> 28;
    key = key.wrapping_add(key << 31) & mask;
    key
}

/// Mix a packed s-mer under the `2 * SMER_LEN` bit mask.
#[inline(always)]
pub fn hash_smer(smer: u64) -> u64 {
    mix64(smer, SMER_MASK)
}

#[inline(always)]
fn unxorshift(mut key: u64, shift: u32) -> u64 {
    let mut acc = key;
    let mut s = shift;
    while s < u64::BITS {
        key >>= shift;
        acc ^= key;
        s += shift;
    }
    acc
}

/// Invert [`mix64`] for a contiguous low-bit `mask` (`2^w - 1`, `w >= 1`).
///
/// `hash` must already lie within `mask`.
pub fn unmix64(hash: u64, mask: u64) -> u64 {
    let mut key = hash.wrapping_mul(INV_STEP7) & mask;
    key = unxorshift(key, 28) & mask;
    key = key.wrapping_mul(INV_STEP5) & mask;
    key = unxorshift(key, 14) & mask;
    key = key.wrapping_mul(INV_STEP3) & mask;
    key = unxorshift(key, 24) & mask;
    // step 1 is key * (2^21 - 1) - 1
    key.wrapping_add(1).wrapping_mul(INV_STEP1) & mask
}

/// Iterator adapter mixing each s-mer 1:1.
#[derive(Debug, Clone)]
pub struct HashMixer<I> {
    smers: I,
    mask: u64,
}

impl<I: Iterator<Item = u64>> HashMixer<I> {
    pub fn new(smers: I) -> Self {
        Self::with_mask(smers, SMER_MASK)
    }

    pub fn with_mask(smers: I, mask: u64) -> Self {
        Self { smers, mask }
    }
}

impl<I: Iterator<Item = u64>> Iterator for HashMixer<I> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        self.smers.next().map(|smer| mix64(smer, self.mask))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.smers.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmer::mask_right;

    #[test]
    fn test_inverse_constants() {
        for (a, inv) in [
            ((1u64 << 21) - 1, INV_STEP1),
            (265, INV_STEP3),
            (21, INV_STEP5),
            (1 + (1u64 << 31), INV_STEP7),
        ] {
            assert_eq!(a.wrapping_mul(inv), 1);
        }
        assert_eq!(INV_STEP5, 0xcf3cf3cf3cf3cf3d);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(hash_smer(0), 0x0077_cfa1_a6f0_1bca);
        assert_eq!(hash_smer(1), 0x00ca_7c69_b794_f8ce);
        assert_eq!(hash_smer(SMER_MASK), 0x00fa_4d15_7df5_16b7);
    }

    #[test]
    fn test_output_stays_in_mask() {
        let mut key = 0x0123_4567_89ab_cdefu64 & SMER_MASK;
        for _ in 0..1000 {
            let h = hash_smer(key);
            assert_eq!(h & !SMER_MASK, 0);
            key = h;
        }
    }

    #[test]
    fn test_unmix_inverts_mix() {
        let mut key = 0x00de_adbe_efca_fe01u64;
        for _ in 0..1000 {
            assert_eq!(unmix64(hash_smer(key), SMER_MASK), key);
            key = key.wrapping_mul(0x9e37_79b9_7f4a_7c15).wrapping_add(7) & SMER_MASK;
        }
    }

    #[test]
    fn test_unmix_other_widths() {
        for bits in [8, 20, 32, 56, 64] {
            let mask = mask_right(bits);
            for key in [0u64, 1, 0x55, mask, mask / 3] {
                let key = key & mask;
                assert_eq!(unmix64(mix64(key, mask), mask), key, "width {}", bits);
            }
        }
    }

    #[test]
    fn test_small_domain_is_bijective() {
        let mask = mask_right(12);
        let mut seen = vec![false; 1 << 12];
        for key in 0..(1u64 << 12) {
            let h = mix64(key, mask) as usize;
            assert!(!seen[h]);
            seen[h] = true;
        }
    }

    #[test]
    fn test_mixer_adapter_is_one_to_one() {
        let hashes: Vec<u64> = HashMixer::new(vec![0u64, 1, 0].into_iter()).collect();
        assert_eq!(hashes, vec![hash_smer(0), hash_smer(1), hash_smer(0)]);
    }
}
