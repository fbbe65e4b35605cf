//! Multi-lane SIMD compression.
//!
//! Each vector lane carries an independent message. Words at the same
//! schedule or state position across all lanes sit in one register, so a
//! single vector instruction performs the scalar operation for every lane.
//! Per-architecture modules only provide the [`Lanes`] primitives; the round
//! function and the lane driver are shared.

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "aarch64")]
mod neon;

use crate::consts::{K32, K64};
use crate::cpu::CpuFeatures;
use crate::pad::Padded;
use crate::util::{be32_at, be64_at};

/// Vector engines the lane-parallel cores can run on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Engine {
    /// 256-bit AVX2 registers.
    Avx2,
    /// 128-bit NEON registers.
    Neon,
}

impl Engine {
    /// Lanes per register for SHA-224/256.
    pub(crate) const fn lanes32(self) -> usize {
        match self {
            Self::Avx2 => 8,
            Self::Neon => 4,
        }
    }

    /// Lanes per register for SHA-384/512.
    pub(crate) const fn lanes64(self) -> usize {
        match self {
            Self::Avx2 => 4,
            Self::Neon => 2,
        }
    }

    pub(crate) fn is_available(self) -> bool {
        let features = CpuFeatures::get();
        match self {
            Self::Avx2 => features.avx2,
            Self::Neon => features.neon,
        }
    }
}

/// Packed lane operations over one register of words.
///
/// # Safety
///
/// Every method requires the CPU feature the implementing type is built
/// for. Callers reach them only through entry points that are themselves
/// compiled for that feature.
pub(crate) trait Lanes: Copy {
    type Word: Copy + Default;

    unsafe fn splat(word: Self::Word) -> Self;
    /// Load one word per lane; `words.len()` equals the lane count.
    unsafe fn gather(words: &[Self::Word]) -> Self;
    unsafe fn scatter(self, out: &mut [Self::Word]);
    unsafe fn add(self, rhs: Self) -> Self;
    unsafe fn xor(self, rhs: Self) -> Self;
    unsafe fn and(self, rhs: Self) -> Self;
    /// `!self & rhs`
    unsafe fn andnot(self, rhs: Self) -> Self;
    unsafe fn rotr(self, n: u32) -> Self;
    unsafe fn shr(self, n: u32) -> Self;
}

/// Rotation and shift amounts of one word-width family.
struct Sigmas {
    big0: [u32; 3],
    big1: [u32; 3],
    /// Two rotations then a shift.
    small0: [u32; 3],
    small1: [u32; 3],
}

const SIGMAS_32: Sigmas = Sigmas {
    big0: [2, 13, 22],
    big1: [6, 11, 25],
    small0: [7, 18, 3],
    small1: [17, 19, 10],
};

const SIGMAS_64: Sigmas = Sigmas {
    big0: [28, 34, 39],
    big1: [14, 18, 41],
    small0: [1, 8, 7],
    small1: [19, 61, 6],
};

#[inline(always)]
unsafe fn big_sigma<V: Lanes>(x: V, r: [u32; 3]) -> V {
    x.rotr(r[0]).xor(x.rotr(r[1])).xor(x.rotr(r[2]))
}

#[inline(always)]
unsafe fn small_sigma<V: Lanes>(x: V, r: [u32; 3]) -> V {
    x.rotr(r[0]).xor(x.rotr(r[1])).xor(x.shr(r[2]))
}

/// One block per lane through the round function, with feed-forward.
///
/// `k` holds the family's round constants; its length is the round count.
#[inline(always)]
unsafe fn compress_core<V: Lanes>(state: &mut [V; 8], block: &[V; 16], k: &[V::Word], s: &Sigmas) {
    let mut w = [block[0]; 80];
    w[..16].copy_from_slice(block);
    for t in 16..k.len() {
        w[t] = small_sigma(w[t - 2], s.small1)
            .add(w[t - 7])
            .add(small_sigma(w[t - 15], s.small0))
            .add(w[t - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for (t, &constant) in k.iter().enumerate() {
        let ch = e.and(f).xor(e.andnot(g));
        let maj = a.and(b).xor(a.and(c)).xor(b.and(c));
        let t1 = h
            .add(big_sigma(e, s.big1))
            .add(ch)
            .add(V::splat(constant))
            .add(w[t]);
        let t2 = big_sigma(a, s.big0).add(maj);

        h = g;
        g = f;
        f = e;
        e = d.add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.add(t2);
    }

    for (word, value) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *word = word.add(value);
    }
}

/// Hash `N` whole messages, one per lane, and return each final state.
///
/// Lanes finish at different block counts. A finished lane keeps running on
/// its last block and its result is captured at the step it completed, so
/// the extra rounds never reach the output.
#[inline(always)]
unsafe fn hash_lanes<V, const N: usize, const BLOCK: usize, const LEN_FIELD: usize>(
    iv: &[V::Word; 8],
    messages: &[&[u8]; N],
    k: &[V::Word],
    sigmas: &Sigmas,
    load: fn(&[u8; BLOCK], usize) -> V::Word,
) -> [[V::Word; 8]; N]
where
    V: Lanes,
{
    let padded: [Padded<'_, BLOCK, LEN_FIELD>; N] =
        std::array::from_fn(|lane| Padded::new(messages[lane]));
    let counts: [usize; N] = std::array::from_fn(|lane| padded[lane].block_count());
    let steps = counts.iter().copied().max().unwrap_or(0);

    let mut state: [V; 8] = [V::splat(V::Word::default()); 8];
    for (vector, &word) in state.iter_mut().zip(iv) {
        *vector = V::splat(word);
    }

    let mut out = [[V::Word::default(); 8]; N];
    let mut column = [V::Word::default(); N];

    for step in 0..steps {
        let blocks: [&[u8; BLOCK]; N] =
            std::array::from_fn(|lane| padded[lane].block(step.min(counts[lane] - 1)));

        let mut words = [state[0]; 16];
        for (index, vector) in words.iter_mut().enumerate() {
            for (slot, block) in column.iter_mut().zip(&blocks) {
                *slot = load(block, index);
            }
            *vector = V::gather(&column);
        }

        compress_core(&mut state, &words, k, sigmas);

        if counts.contains(&(step + 1)) {
            for (position, vector) in state.iter().enumerate() {
                vector.scatter(&mut column);
                for ((lane, &count), &word) in out.iter_mut().zip(&counts).zip(&column) {
                    if count == step + 1 {
                        lane[position] = word;
                    }
                }
            }
        }
    }

    out
}

/// Lane-parallel SHA-224/256 over `N` messages.
#[inline(always)]
unsafe fn hash256_lanes<V: Lanes<Word = u32>, const N: usize>(
    iv: &[u32; 8],
    messages: &[&[u8]; N],
) -> [[u32; 8]; N] {
    hash_lanes::<V, N, 64, 8>(iv, messages, &K32, &SIGMAS_32, be32_at)
}

/// Lane-parallel SHA-384/512 over `N` messages.
#[inline(always)]
unsafe fn hash512_lanes<V: Lanes<Word = u64>, const N: usize>(
    iv: &[u64; 8],
    messages: &[&[u8]; N],
) -> [[u64; 8]; N] {
    hash_lanes::<V, N, 128, 16>(iv, messages, &K64, &SIGMAS_64, be64_at)
}

/// Fill a full lane array, padding unused lanes with empty messages.
fn fill_lanes<'a, const N: usize>(messages: &[&'a [u8]]) -> [&'a [u8]; N] {
    std::array::from_fn(|lane| messages.get(lane).copied().unwrap_or_default())
}

/// Hash up to one register's worth of SHA-224/256 messages.
///
/// Writes one final state per message into `out` and returns `true`. Returns
/// `false` without touching `out` when the engine is missing on this CPU or
/// when `messages` does not fit the lane width, so the caller can fall back.
pub(crate) fn hash32_group(
    engine: Engine,
    iv: &[u32; 8],
    messages: &[&[u8]],
    out: &mut [[u32; 8]],
) -> bool {
    if messages.len() != out.len() || messages.len() > engine.lanes32() || !engine.is_available()
    {
        return false;
    }

    match engine {
        #[cfg(target_arch = "x86_64")]
        Engine::Avx2 => {
            let lanes = fill_lanes::<8>(messages);
            // SAFETY: AVX2 presence was checked above.
            let states = unsafe { avx2::hash256_x8(iv, &lanes) };
            out.copy_from_slice(&states[..messages.len()]);
            true
        }
        #[cfg(target_arch = "aarch64")]
        Engine::Neon => {
            let lanes = fill_lanes::<4>(messages);
            // SAFETY: NEON presence was checked above.
            let states = unsafe { neon::hash256_x4(iv, &lanes) };
            out.copy_from_slice(&states[..messages.len()]);
            true
        }
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

/// Hash up to one register's worth of SHA-384/512 messages.
///
/// Same contract as [`hash32_group`].
pub(crate) fn hash64_group(
    engine: Engine,
    iv: &[u64; 8],
    messages: &[&[u8]],
    out: &mut [[u64; 8]],
) -> bool {
    if messages.len() != out.len() || messages.len() > engine.lanes64() || !engine.is_available()
    {
        return false;
    }

    match engine {
        #[cfg(target_arch = "x86_64")]
        Engine::Avx2 => {
            let lanes = fill_lanes::<4>(messages);
            // SAFETY: AVX2 presence was checked above.
            let states = unsafe { avx2::hash512_x4(iv, &lanes) };
            out.copy_from_slice(&states[..messages.len()]);
            true
        }
        #[cfg(target_arch = "aarch64")]
        Engine::Neon => {
            let lanes = fill_lanes::<2>(messages);
            // SAFETY: NEON presence was checked above.
            let states = unsafe { neon::hash512_x2(iv, &lanes) };
            out.copy_from_slice(&states[..messages.len()]);
            true
        }
        #[allow(unreachable_patterns)]
        _ => false,
    }
}
