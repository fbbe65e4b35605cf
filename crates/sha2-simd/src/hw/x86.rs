//! SHA-256 with the x86 SHA extensions.
//!
//! `sha256rnds2` keeps the state split as ABEF/CDGH and performs two rounds
//! per call; `sha256msg1`/`sha256msg2` advance the message schedule four
//! words at a time.

use std::arch::x86_64::*;

use crate::consts::K32;

/// Compress `blocks` into `state` in order.
///
/// # Safety
/// Caller must ensure the `sha`, `sse2`, `ssse3` and `sse4.1` features are
/// available.
#[target_feature(enable = "sha,sse2,ssse3,sse4.1")]
pub(super) unsafe fn compress256_blocks(state: &mut [u32; 8], blocks: &[[u8; 64]]) {
    let byte_swap = _mm_set_epi64x(0x0c0d_0e0f_0809_0a0b, 0x0405_0607_0001_0203);
    let k = &K32;

    let dcba = _mm_loadu_si128(state.as_ptr().cast());
    let hgfe = _mm_loadu_si128(state.as_ptr().add(4).cast());

    let cdab = _mm_shuffle_epi32(dcba, 0xB1);
    let efgh = _mm_shuffle_epi32(hgfe, 0x1B);
    let mut abef = _mm_alignr_epi8(cdab, efgh, 8);
    let mut cdgh = _mm_blend_epi16(efgh, cdab, 0xF0);

    for block in blocks {
        let abef_save = abef;
        let cdgh_save = cdgh;

        let mut w = [
            _mm_shuffle_epi8(_mm_loadu_si128(block.as_ptr().cast()), byte_swap),
            _mm_shuffle_epi8(_mm_loadu_si128(block.as_ptr().add(16).cast()), byte_swap),
            _mm_shuffle_epi8(_mm_loadu_si128(block.as_ptr().add(32).cast()), byte_swap),
            _mm_shuffle_epi8(_mm_loadu_si128(block.as_ptr().add(48).cast()), byte_swap),
        ];

        for group in 0..16 {
            let current = w[group % 4];
            let msg = _mm_add_epi32(current, _mm_loadu_si128(k.as_ptr().add(4 * group).cast()));
            cdgh = _mm_sha256rnds2_epu32(cdgh, abef, msg);
            abef = _mm_sha256rnds2_epu32(abef, cdgh, _mm_shuffle_epi32(msg, 0x0E));

            // Words for group + 4 replace the group just consumed.
            if group < 12 {
                let next = w[(group + 1) % 4];
                let third = w[(group + 2) % 4];
                let last = w[(group + 3) % 4];
                let partial = _mm_add_epi32(
                    _mm_sha256msg1_epu32(current, next),
                    _mm_alignr_epi8(last, third, 4),
                );
                w[group % 4] = _mm_sha256msg2_epu32(partial, last);
            }
        }

        abef = _mm_add_epi32(abef, abef_save);
        cdgh = _mm_add_epi32(cdgh, cdgh_save);
    }

    let feba = _mm_shuffle_epi32(abef, 0x1B);
    let dchg = _mm_shuffle_epi32(cdgh, 0xB1);
    let dcba = _mm_blend_epi16(feba, dchg, 0xF0);
    let hgef = _mm_alignr_epi8(dchg, feba, 8);

    _mm_storeu_si128(state.as_mut_ptr().cast(), dcba);
    _mm_storeu_si128(state.as_mut_ptr().add(4).cast(), hgef);
}
