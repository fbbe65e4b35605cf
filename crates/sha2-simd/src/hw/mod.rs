//! Dedicated SHA-256 instructions.
//!
//! Both kernels run several rounds per instruction on the 32-bit-family
//! state. There is no 64-bit-family counterpart, so SHA-384/512 never reach
//! this module.

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86;

use crate::cpu::CpuFeatures;

/// Multi-block 32-bit-family compression function.
pub(crate) type Compress256Fn = fn(&mut [u32; 8], &[[u8; 64]]);

/// Instruction sets this module has kernels for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Engine {
    /// x86 SHA extensions.
    ShaNi,
    /// ARMv8 cryptographic extensions.
    ArmSha2,
}

impl Engine {
    pub(crate) fn is_available(self) -> bool {
        let features = CpuFeatures::get();
        match self {
            Self::ShaNi => features.sha_ni,
            Self::ArmSha2 => features.arm_sha2,
        }
    }

    /// The kernel for this engine, if the running CPU can execute it.
    pub(crate) fn compress256(self) -> Option<Compress256Fn> {
        if !self.is_available() {
            return None;
        }
        match self {
            #[cfg(target_arch = "x86_64")]
            Self::ShaNi => Some(sha_ni_blocks),
            #[cfg(target_arch = "aarch64")]
            Self::ArmSha2 => Some(arm_sha2_blocks),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

// Only handed out by `Engine::compress256` after the feature check.
#[cfg(target_arch = "x86_64")]
fn sha_ni_blocks(state: &mut [u32; 8], blocks: &[[u8; 64]]) {
    // SAFETY: SHA, SSE2, SSSE3 and SSE4.1 were detected before this
    // function pointer was returned.
    unsafe { x86::compress256_blocks(state, blocks) }
}

#[cfg(target_arch = "aarch64")]
fn arm_sha2_blocks(state: &mut [u32; 8], blocks: &[[u8; 64]]) {
    // SAFETY: the sha2 extension was detected before this function pointer
    // was returned.
    unsafe { aarch64::compress256_blocks(state, blocks) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SHA224_IV, SHA256_IV};
    use crate::scalar;

    fn available() -> impl Iterator<Item = (Engine, Compress256Fn)> {
        [Engine::ShaNi, Engine::ArmSha2]
            .into_iter()
            .filter_map(|engine| engine.compress256().map(|f| (engine, f)))
    }

    #[test]
    fn kernel_is_offered_only_when_detected() {
        for engine in [Engine::ShaNi, Engine::ArmSha2] {
            assert_eq!(engine.compress256().is_some(), engine.is_available());
        }
    }

    #[test]
    fn matches_scalar_over_many_blocks() {
        let data = test_support::seeded_bytes(64 * 17, 0x5a2);
        let (blocks, _) = data.as_chunks::<64>();

        for (engine, compress) in available() {
            for iv in [SHA224_IV, SHA256_IV] {
                for count in [0, 1, 2, 3, 17] {
                    let mut expected = iv;
                    scalar::compress256_blocks(&mut expected, &blocks[..count]);
                    let mut state = iv;
                    compress(&mut state, &blocks[..count]);
                    assert_eq!(state, expected, "{engine:?} blocks={count}");
                }
            }
        }
    }

    #[test]
    fn abc_digest_words() {
        for (engine, compress) in available() {
            let padded = crate::pad::Padded32::new(b"abc");
            let mut state = SHA256_IV;
            compress(&mut state, padded.tail_blocks());
            assert_eq!(state[0], 0xba7816bf, "{engine:?}");
            assert_eq!(state[7], 0xf20015ad, "{engine:?}");
        }
    }
}
