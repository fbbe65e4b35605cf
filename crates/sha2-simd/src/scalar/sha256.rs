//! SHA-224/256 compression (FIPS 180-4 §6.2.2).

use crate::consts::{K32, ROUNDS_32};
use crate::util::{add32, load_be32, rotr32};

#[inline(always)]
const fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
const fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
const fn big_sigma0(x: u32) -> u32 {
    rotr32(x, 2) ^ rotr32(x, 13) ^ rotr32(x, 22)
}

#[inline(always)]
const fn big_sigma1(x: u32) -> u32 {
    rotr32(x, 6) ^ rotr32(x, 11) ^ rotr32(x, 25)
}

#[inline(always)]
const fn small_sigma0(x: u32) -> u32 {
    rotr32(x, 7) ^ rotr32(x, 18) ^ (x >> 3)
}

#[inline(always)]
const fn small_sigma1(x: u32) -> u32 {
    rotr32(x, 17) ^ rotr32(x, 19) ^ (x >> 10)
}

/// Advance `state` by one 64-byte block.
pub fn compress256(state: &mut [u32; 8], block: &[u8; 64]) {
    let mut w = [0u32; ROUNDS_32];
    w[..16].copy_from_slice(&load_be32(block));
    for t in 16..ROUNDS_32 {
        w[t] = add32(
            add32(small_sigma1(w[t - 2]), w[t - 7]),
            add32(small_sigma0(w[t - 15]), w[t - 16]),
        );
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..ROUNDS_32 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(K32[t])
            .wrapping_add(w[t]);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (word, value) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *word = add32(*word, value);
    }
}

/// Advance `state` across `blocks` in order.
pub fn compress256_blocks(state: &mut [u32; 8], blocks: &[[u8; 64]]) {
    for block in blocks {
        compress256(state, block);
    }
}
