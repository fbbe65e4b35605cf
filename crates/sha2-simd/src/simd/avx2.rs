//! AVX2 lanes: eight 32-bit or four 64-bit words per `__m256i`.

use std::arch::x86_64::*;

use super::{Lanes, hash256_lanes, hash512_lanes};

/// Eight 32-bit lanes.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub(super) struct U32x8(__m256i);

/// Four 64-bit lanes.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub(super) struct U64x4(__m256i);

impl Lanes for U32x8 {
    type Word = u32;

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn splat(word: u32) -> Self {
        Self(_mm256_set1_epi32(word as i32))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn gather(words: &[u32]) -> Self {
        debug_assert_eq!(words.len(), 8);
        Self(_mm256_loadu_si256(words.as_ptr().cast()))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn scatter(self, out: &mut [u32]) {
        debug_assert_eq!(out.len(), 8);
        _mm256_storeu_si256(out.as_mut_ptr().cast(), self.0);
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn add(self, rhs: Self) -> Self {
        Self(_mm256_add_epi32(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn xor(self, rhs: Self) -> Self {
        Self(_mm256_xor_si256(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn and(self, rhs: Self) -> Self {
        Self(_mm256_and_si256(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn andnot(self, rhs: Self) -> Self {
        Self(_mm256_andnot_si256(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn rotr(self, n: u32) -> Self {
        let right = _mm256_srlv_epi32(self.0, _mm256_set1_epi32(n as i32));
        let left = _mm256_sllv_epi32(self.0, _mm256_set1_epi32((32 - n) as i32));
        Self(_mm256_or_si256(right, left))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn shr(self, n: u32) -> Self {
        Self(_mm256_srlv_epi32(self.0, _mm256_set1_epi32(n as i32)))
    }
}

impl Lanes for U64x4 {
    type Word = u64;

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn splat(word: u64) -> Self {
        Self(_mm256_set1_epi64x(word as i64))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn gather(words: &[u64]) -> Self {
        debug_assert_eq!(words.len(), 4);
        Self(_mm256_loadu_si256(words.as_ptr().cast()))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn scatter(self, out: &mut [u64]) {
        debug_assert_eq!(out.len(), 4);
        _mm256_storeu_si256(out.as_mut_ptr().cast(), self.0);
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn add(self, rhs: Self) -> Self {
        Self(_mm256_add_epi64(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn xor(self, rhs: Self) -> Self {
        Self(_mm256_xor_si256(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn and(self, rhs: Self) -> Self {
        Self(_mm256_and_si256(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn andnot(self, rhs: Self) -> Self {
        Self(_mm256_andnot_si256(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn rotr(self, n: u32) -> Self {
        let right = _mm256_srlv_epi64(self.0, _mm256_set1_epi64x(i64::from(n)));
        let left = _mm256_sllv_epi64(self.0, _mm256_set1_epi64x(i64::from(64 - n)));
        Self(_mm256_or_si256(right, left))
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn shr(self, n: u32) -> Self {
        Self(_mm256_srlv_epi64(self.0, _mm256_set1_epi64x(i64::from(n))))
    }
}

/// Hash eight SHA-224/256 messages in parallel.
///
/// # Safety
/// Caller must ensure AVX2 is available (use `is_x86_feature_detected!`).
#[target_feature(enable = "avx2")]
pub(super) unsafe fn hash256_x8(iv: &[u32; 8], messages: &[&[u8]; 8]) -> [[u32; 8]; 8] {
    hash256_lanes::<U32x8, 8>(iv, messages)
}

/// Hash four SHA-384/512 messages in parallel.
///
/// # Safety
/// Caller must ensure AVX2 is available (use `is_x86_feature_detected!`).
#[target_feature(enable = "avx2")]
pub(super) unsafe fn hash512_x4(iv: &[u64; 8], messages: &[&[u8]; 4]) -> [[u64; 8]; 4] {
    hash512_lanes::<U64x4, 4>(iv, messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SHA224_IV, SHA512_IV};

    #[test]
    fn rotations_match_scalar_per_lane() {
        if !is_x86_feature_detected!("avx2") {
            eprintln!("AVX2 not available, skipping test");
            return;
        }

        let words: [u32; 8] = std::array::from_fn(|i| 0x0123_4567u32.wrapping_mul(i as u32 + 1));
        let mut out = [0u32; 8];
        unsafe {
            U32x8::gather(&words).rotr(7).scatter(&mut out);
        }
        for (got, word) in out.iter().zip(words) {
            assert_eq!(*got, word.rotate_right(7));
        }

        let words: [u64; 4] = std::array::from_fn(|i| 0x0123_4567_89ab_cdefu64 << i);
        let mut out = [0u64; 4];
        unsafe {
            U64x4::gather(&words).rotr(41).scatter(&mut out);
        }
        for (got, word) in out.iter().zip(words) {
            assert_eq!(*got, word.rotate_right(41));
        }
    }

    #[test]
    fn avx2_matches_scalar() {
        if !is_x86_feature_detected!("avx2") {
            eprintln!("AVX2 not available, skipping test");
            return;
        }

        let inputs: [&[u8]; 8] = [
            b"",
            b"abc",
            b"input 2",
            &[0u8; 55],
            &[1u8; 56],
            &[2u8; 64],
            &[3u8; 119],
            &[4u8; 300],
        ];
        let states = unsafe { hash256_x8(&SHA224_IV, &inputs) };
        for (lane, input) in inputs.iter().enumerate() {
            let mut expected = SHA224_IV;
            for block in crate::pad::Padded32::new(input).blocks() {
                crate::scalar::compress256(&mut expected, block);
            }
            assert_eq!(states[lane], expected, "Mismatch at lane {lane}");
        }

        let wide: [&[u8]; 4] = [b"", &[9u8; 111], &[9u8; 112], &[9u8; 640]];
        let states = unsafe { hash512_x4(&SHA512_IV, &wide) };
        for (lane, input) in wide.iter().enumerate() {
            let mut expected = SHA512_IV;
            for block in crate::pad::Padded64::new(input).blocks() {
                crate::scalar::compress512(&mut expected, block);
            }
            assert_eq!(states[lane], expected, "Mismatch at lane {lane}");
        }
    }
}
