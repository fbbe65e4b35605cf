//! Fixed-width word helpers shared by every compression backend.
//!
//! SHA-2 arithmetic is modulo 2^32 or 2^64 and all message and state words
//! are big-endian on the wire, regardless of the host byte order.

/// Rotate a 32-bit word right by `n` bits.
#[inline(always)]
pub const fn rotr32(x: u32, n: u32) -> u32 {
    x.rotate_right(n)
}

/// Rotate a 64-bit word right by `n` bits.
#[inline(always)]
pub const fn rotr64(x: u64, n: u32) -> u64 {
    x.rotate_right(n)
}

/// Addition modulo 2^32.
#[inline(always)]
pub const fn add32(a: u32, b: u32) -> u32 {
    a.wrapping_add(b)
}

/// Addition modulo 2^64.
#[inline(always)]
pub const fn add64(a: u64, b: u64) -> u64 {
    a.wrapping_add(b)
}

/// Reverse the byte order of a 32-bit word.
#[inline(always)]
pub const fn bswap32(x: u32) -> u32 {
    x.swap_bytes()
}

/// Reverse the byte order of a 64-bit word.
#[inline(always)]
pub const fn bswap64(x: u64) -> u64 {
    x.swap_bytes()
}

/// Big-endian 32-bit word `index` of a 64-byte block.
#[inline(always)]
pub fn be32_at(block: &[u8; 64], index: usize) -> u32 {
    let (words, _) = block.as_chunks::<4>();
    u32::from_be_bytes(words[index])
}

/// Big-endian 64-bit word `index` of a 128-byte block.
#[inline(always)]
pub fn be64_at(block: &[u8; 128], index: usize) -> u64 {
    let (words, _) = block.as_chunks::<8>();
    u64::from_be_bytes(words[index])
}

/// The sixteen big-endian words of a 64-byte block.
#[inline]
pub fn load_be32(block: &[u8; 64]) -> [u32; 16] {
    std::array::from_fn(|i| be32_at(block, i))
}

/// The sixteen big-endian words of a 128-byte block.
#[inline]
pub fn load_be64(block: &[u8; 128]) -> [u64; 16] {
    std::array::from_fn(|i| be64_at(block, i))
}

/// Write `words` big-endian into `out`, stopping when `out` is full.
///
/// Truncated digests (SHA-224, SHA-384) pass a shorter `out` and keep the
/// leading bytes of the state.
#[inline]
pub fn store_be32(words: &[u32], out: &mut [u8]) {
    for (chunk, word) in out.chunks_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes()[..chunk.len()]);
    }
}

/// 64-bit counterpart of [`store_be32`].
#[inline]
pub fn store_be64(words: &[u64], out: &mut [u8]) {
    for (chunk, word) in out.chunks_mut(8).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes()[..chunk.len()]);
    }
}
