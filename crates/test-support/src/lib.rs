//! Shared helpers for sha2-simd tests and benches.
//!
//! Everything here is deterministic unless the name says otherwise, so a
//! failing case can be reproduced from its length and seed alone.

use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// Block size of SHA-224/256 in bytes.
pub const BLOCK_32: usize = 64;

/// Block size of SHA-384/512 in bytes.
pub const BLOCK_64: usize = 128;

/// Convert a byte slice to a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(&mut out, "{byte:02x}").expect("write! to String cannot fail");
    }
    out
}

/// Deterministic, non-repeating-looking byte pattern of `len` bytes.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add((i >> 8) as u8))
        .collect()
}

/// `len` random bytes from a generator seeded with `seed`.
pub fn seeded_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill(&mut data[..]);
    data
}

/// `len` bytes from the thread-local generator.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    rand::thread_rng().fill(&mut data[..]);
    data
}

/// Message lengths around every padding edge of a block of `block` bytes
/// whose length field occupies `len_field` bytes.
///
/// Covers the empty message, the last length that still fits one block,
/// the first length that spills into a second padding block, exact block
/// multiples, and a three-block message.
pub fn boundary_lengths(block: usize, len_field: usize) -> Vec<usize> {
    let last_single = block - len_field - 1;
    let mut lens = vec![
        0,
        1,
        2,
        3,
        last_single - 1,
        last_single,
        last_single + 1,
        block - 1,
        block,
        block + 1,
        block + last_single,
        block + last_single + 1,
        2 * block - 1,
        2 * block,
        3 * block + 7,
        5 * block,
    ];
    lens.sort_unstable();
    lens.dedup();
    lens
}

/// Copy of `data` with bit `bit` (counted from the first byte's MSB) flipped.
pub fn flip_bit(data: &[u8], bit: usize) -> Vec<u8> {
    let mut out = data.to_vec();
    out[bit / 8] ^= 0x80 >> (bit % 8);
    out
}

/// Number of differing bits between two equally long byte slices.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> u32 {
    assert_eq!(a.len(), b.len(), "hamming distance needs equal lengths");
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

/// Temporary directory populated with one file per entry of `contents`.
///
/// The directory is removed when the returned [`TempDir`] is dropped.
pub fn temp_files(contents: &[&[u8]]) -> io::Result<(TempDir, Vec<PathBuf>)> {
    let dir = tempfile::tempdir()?;
    let mut paths = Vec::with_capacity(contents.len());
    for (i, data) in contents.iter().enumerate() {
        let path = dir.path().join(format!("input{i}.bin"));
        let mut file = std::fs::File::create(&path)?;
        file.write_all(data)?;
        paths.push(path);
    }
    Ok((dir, paths))
}
