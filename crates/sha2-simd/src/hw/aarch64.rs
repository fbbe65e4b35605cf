//! SHA-256 with the ARMv8 cryptographic extensions.

use std::arch::aarch64::*;

use crate::consts::K32;

/// Compress `blocks` into `state` in order.
///
/// # Safety
/// Caller must ensure the `sha2` feature is available.
#[target_feature(enable = "sha2")]
pub(super) unsafe fn compress256_blocks(state: &mut [u32; 8], blocks: &[[u8; 64]]) {
    let k = &K32;

    let mut abcd = vld1q_u32(state.as_ptr());
    let mut efgh = vld1q_u32(state.as_ptr().add(4));

    for block in blocks {
        let abcd_save = abcd;
        let efgh_save = efgh;

        let bytes = block.as_ptr();
        let mut w = [
            vreinterpretq_u32_u8(vrev32q_u8(vld1q_u8(bytes))),
            vreinterpretq_u32_u8(vrev32q_u8(vld1q_u8(bytes.add(16)))),
            vreinterpretq_u32_u8(vrev32q_u8(vld1q_u8(bytes.add(32)))),
            vreinterpretq_u32_u8(vrev32q_u8(vld1q_u8(bytes.add(48)))),
        ];

        for group in 0..16 {
            let msg = vaddq_u32(w[group % 4], vld1q_u32(k.as_ptr().add(4 * group)));
            let abcd_prev = abcd;
            abcd = vsha256hq_u32(abcd_prev, efgh, msg);
            efgh = vsha256h2q_u32(efgh, abcd_prev, msg);

            if group < 12 {
                w[group % 4] = vsha256su1q_u32(
                    vsha256su0q_u32(w[group % 4], w[(group + 1) % 4]),
                    w[(group + 2) % 4],
                    w[(group + 3) % 4],
                );
            }
        }

        abcd = vaddq_u32(abcd, abcd_save);
        efgh = vaddq_u32(efgh, efgh_save);
    }

    vst1q_u32(state.as_mut_ptr(), abcd);
    vst1q_u32(state.as_mut_ptr().add(4), efgh);
}
