//! SHA-384/512 compression (FIPS 180-4 §6.4.2).

use crate::consts::{K64, ROUNDS_64};
use crate::util::{add64, load_be64, rotr64};

#[inline(always)]
const fn ch(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
const fn maj(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
const fn big_sigma0(x: u64) -> u64 {
    rotr64(x, 28) ^ rotr64(x, 34) ^ rotr64(x, 39)
}

#[inline(always)]
const fn big_sigma1(x: u64) -> u64 {
    rotr64(x, 14) ^ rotr64(x, 18) ^ rotr64(x, 41)
}

#[inline(always)]
const fn small_sigma0(x: u64) -> u64 {
    rotr64(x, 1) ^ rotr64(x, 8) ^ (x >> 7)
}

#[inline(always)]
const fn small_sigma1(x: u64) -> u64 {
    rotr64(x, 19) ^ rotr64(x, 61) ^ (x >> 6)
}

/// Advance `state` by one 128-byte block.
pub fn compress512(state: &mut [u64; 8], block: &[u8; 128]) {
    let mut w = [0u64; ROUNDS_64];
    w[..16].copy_from_slice(&load_be64(block));
    for t in 16..ROUNDS_64 {
        w[t] = add64(
            add64(small_sigma1(w[t - 2]), w[t - 7]),
            add64(small_sigma0(w[t - 15]), w[t - 16]),
        );
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..ROUNDS_64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(K64[t])
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
        *word = add64(*word, value);
    }
}

/// Advance `state` across `blocks` in order.
pub fn compress512_blocks(state: &mut [u64; 8], blocks: &[[u8; 128]]) {
    for block in blocks {
        compress512(state, block);
    }
}
