//! NEON lanes: four 32-bit or two 64-bit words per 128-bit register.
//!
//! NEON has no right-shift-by-register; `vshlq` with a negative count
//! shifts right.

use std::arch::aarch64::*;

use super::{Lanes, hash256_lanes, hash512_lanes};

#[derive(Clone, Copy)]
#[repr(transparent)]
pub(super) struct U32x4(uint32x4_t);

#[derive(Clone, Copy)]
#[repr(transparent)]
pub(super) struct U64x2(uint64x2_t);

impl Lanes for U32x4 {
    type Word = u32;

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn splat(word: u32) -> Self {
        Self(vdupq_n_u32(word))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn gather(words: &[u32]) -> Self {
        debug_assert_eq!(words.len(), 4);
        Self(vld1q_u32(words.as_ptr()))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn scatter(self, out: &mut [u32]) {
        debug_assert_eq!(out.len(), 4);
        vst1q_u32(out.as_mut_ptr(), self.0);
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn add(self, rhs: Self) -> Self {
        Self(vaddq_u32(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn xor(self, rhs: Self) -> Self {
        Self(veorq_u32(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn and(self, rhs: Self) -> Self {
        Self(vandq_u32(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn andnot(self, rhs: Self) -> Self {
        Self(vbicq_u32(rhs.0, self.0))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn rotr(self, n: u32) -> Self {
        let right = vshlq_u32(self.0, vdupq_n_s32(-(n as i32)));
        let left = vshlq_u32(self.0, vdupq_n_s32((32 - n) as i32));
        Self(vorrq_u32(right, left))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn shr(self, n: u32) -> Self {
        Self(vshlq_u32(self.0, vdupq_n_s32(-(n as i32))))
    }
}

impl Lanes for U64x2 {
    type Word = u64;

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn splat(word: u64) -> Self {
        Self(vdupq_n_u64(word))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn gather(words: &[u64]) -> Self {
        debug_assert_eq!(words.len(), 2);
        Self(vld1q_u64(words.as_ptr()))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn scatter(self, out: &mut [u64]) {
        debug_assert_eq!(out.len(), 2);
        vst1q_u64(out.as_mut_ptr(), self.0);
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn add(self, rhs: Self) -> Self {
        Self(vaddq_u64(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn xor(self, rhs: Self) -> Self {
        Self(veorq_u64(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn and(self, rhs: Self) -> Self {
        Self(vandq_u64(self.0, rhs.0))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn andnot(self, rhs: Self) -> Self {
        Self(vbicq_u64(rhs.0, self.0))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn rotr(self, n: u32) -> Self {
        let right = vshlq_u64(self.0, vdupq_n_s64(-i64::from(n)));
        let left = vshlq_u64(self.0, vdupq_n_s64(i64::from(64 - n)));
        Self(vorrq_u64(right, left))
    }

    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn shr(self, n: u32) -> Self {
        Self(vshlq_u64(self.0, vdupq_n_s64(-i64::from(n))))
    }
}

/// Hash four SHA-224/256 messages in parallel.
///
/// # Safety
/// Caller must ensure NEON is available.
#[target_feature(enable = "neon")]
pub(super) unsafe fn hash256_x4(iv: &[u32; 8], messages: &[&[u8]; 4]) -> [[u32; 8]; 4] {
    hash256_lanes::<U32x4, 4>(iv, messages)
}

/// Hash two SHA-384/512 messages in parallel.
///
/// # Safety
/// Caller must ensure NEON is available.
#[target_feature(enable = "neon")]
pub(super) unsafe fn hash512_x2(iv: &[u64; 8], messages: &[&[u8]; 2]) -> [[u64; 8]; 2] {
    hash512_lanes::<U64x2, 2>(iv, messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SHA256_IV, SHA384_IV};

    #[test]
    fn neon_matches_scalar() {
        if !std::arch::is_aarch64_feature_detected!("neon") {
            eprintln!("NEON not available, skipping test");
            return;
        }

        let inputs: [&[u8]; 4] = [b"", b"abc", &[5u8; 56], &[6u8; 257]];
        let states = unsafe { hash256_x4(&SHA256_IV, &inputs) };
        for (lane, input) in inputs.iter().enumerate() {
            let mut expected = SHA256_IV;
            for block in crate::pad::Padded32::new(input).blocks() {
                crate::scalar::compress256(&mut expected, block);
            }
            assert_eq!(states[lane], expected, "Mismatch at lane {lane}");
        }

        let wide: [&[u8]; 2] = [&[7u8; 112], b"abc"];
        let states = unsafe { hash512_x2(&SHA384_IV, &wide) };
        for (lane, input) in wide.iter().enumerate() {
            let mut expected = SHA384_IV;
            for block in crate::pad::Padded64::new(input).blocks() {
                crate::scalar::compress512(&mut expected, block);
            }
            assert_eq!(states[lane], expected, "Mismatch at lane {lane}");
        }
    }
}
