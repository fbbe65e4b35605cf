//! Rayon integration for parallel SHA-2 hashing.
//!
//! [`ParallelSha2`] hashes the items of a parallel iterator through the
//! batched entry points, and [`digest_files`] reads and hashes files on the
//! rayon pool, keeping results in path order.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use logging::trace_files;
use rayon::prelude::*;

use crate::{
    Digest224, Digest256, Digest384, Digest512, hash224, hash224_batch, hash256, hash256_batch,
    hash384, hash384_batch, hash512, hash512_batch,
};

/// A SHA-2 variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl Algorithm {
    /// Digest width in bits.
    pub const fn bits(self) -> usize {
        match self {
            Self::Sha224 => 224,
            Self::Sha256 => 256,
            Self::Sha384 => 384,
            Self::Sha512 => 512,
        }
    }

    /// Hash `message` with this variant.
    pub fn digest(self, message: &[u8]) -> AnyDigest {
        match self {
            Self::Sha224 => AnyDigest::Sha224(hash224(message)),
            Self::Sha256 => AnyDigest::Sha256(hash256(message)),
            Self::Sha384 => AnyDigest::Sha384(hash384(message)),
            Self::Sha512 => AnyDigest::Sha512(hash512(message)),
        }
    }
}

/// A digest of any SHA-2 width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnyDigest {
    /// SHA-224 digest.
    Sha224(Digest224),
    /// SHA-256 digest.
    Sha256(Digest256),
    /// SHA-384 digest.
    Sha384(Digest384),
    /// SHA-512 digest.
    Sha512(Digest512),
}

impl AnyDigest {
    /// The variant that produced this digest.
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Sha224(_) => Algorithm::Sha224,
            Self::Sha256(_) => Algorithm::Sha256,
            Self::Sha384(_) => Algorithm::Sha384,
            Self::Sha512(_) => Algorithm::Sha512,
        }
    }

    /// The digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Sha224(d) => d.as_bytes(),
            Self::Sha256(d) => d.as_bytes(),
            Self::Sha384(d) => d.as_bytes(),
            Self::Sha512(d) => d.as_bytes(),
        }
    }
}

impl AsRef<[u8]> for AnyDigest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for AnyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha224(d) => fmt::Display::fmt(d, f),
            Self::Sha256(d) => fmt::Display::fmt(d, f),
            Self::Sha384(d) => fmt::Display::fmt(d, f),
            Self::Sha512(d) => fmt::Display::fmt(d, f),
        }
    }
}

/// Extension trait for parallel SHA-2 hashing.
///
/// Collects a parallel iterator and hashes the items through the batched
/// API, so SIMD lanes are used when beneficial.
///
/// # Example
///
/// ```
/// use rayon::prelude::*;
/// use sha2_simd::ParallelSha2;
///
/// let data: Vec<Vec<u8>> = vec![
///     b"hello".to_vec(),
///     b"world".to_vec(),
///     b"test".to_vec(),
/// ];
///
/// let digests = data.par_iter().sha256_digest();
/// assert_eq!(digests.len(), 3);
/// ```
pub trait ParallelSha2<T> {
    /// SHA-224 digests in iterator order.
    fn sha224_digest(self) -> Vec<Digest224>;
    /// SHA-256 digests in iterator order.
    fn sha256_digest(self) -> Vec<Digest256>;
    /// SHA-384 digests in iterator order.
    fn sha384_digest(self) -> Vec<Digest384>;
    /// SHA-512 digests in iterator order.
    fn sha512_digest(self) -> Vec<Digest512>;
}

impl<I, T> ParallelSha2<T> for I
where
    I: ParallelIterator<Item = T>,
    T: AsRef<[u8]> + Send,
{
    fn sha224_digest(self) -> Vec<Digest224> {
        let items: Vec<T> = self.collect();
        hash224_batch(&items)
    }

    fn sha256_digest(self) -> Vec<Digest256> {
        let items: Vec<T> = self.collect();
        hash256_batch(&items)
    }

    fn sha384_digest(self) -> Vec<Digest384> {
        let items: Vec<T> = self.collect();
        hash384_batch(&items)
    }

    fn sha512_digest(self) -> Vec<Digest512> {
        let items: Vec<T> = self.collect();
        hash512_batch(&items)
    }
}

/// Compute digests for multiple files in parallel.
///
/// Reads each file and hashes it with `algorithm`. Files are read and hashed
/// in parallel using rayon's thread pool; results follow `paths` order.
///
/// # Example
///
/// ```no_run
/// use sha2_simd::{Algorithm, digest_files};
///
/// let paths = ["file1.txt", "file2.txt", "file3.txt"];
/// let results = digest_files(&paths, Algorithm::Sha256);
///
/// for (path, result) in paths.iter().zip(results.iter()) {
///     match result {
///         Ok(digest) => println!("{path}: {digest}"),
///         Err(e) => println!("{path}: error - {e}"),
///     }
/// }
/// ```
pub fn digest_files<P: AsRef<Path> + Sync>(
    paths: &[P],
    algorithm: Algorithm,
) -> Vec<io::Result<AnyDigest>> {
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let data = fs::read(path).inspect_err(|err| {
                trace_files!(path = %path.display(), error = %err, "read failed");
            })?;
            trace_files!(path = %path.display(), bytes = data.len(), bits = algorithm.bits(), "hashed file");
            Ok(algorithm.digest(&data))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_sha2_matches_sequential() {
        let data: Vec<Vec<u8>> = (0..21).map(|n| test_support::pattern(n * 17)).collect();

        let parallel: Vec<Digest256> = data.par_iter().sha256_digest();
        let sequential: Vec<Digest256> = data.iter().map(|d| hash256(d)).collect();
        assert_eq!(parallel, sequential);

        let parallel = data.par_iter().sha384_digest();
        let sequential: Vec<Digest384> = data.iter().map(|d| hash384(d)).collect();
        assert_eq!(parallel, sequential);

        assert_eq!(data.par_iter().sha224_digest()[5], hash224(&data[5]));
        assert_eq!(data.par_iter().sha512_digest()[20], hash512(&data[20]));
    }

    #[test]
    fn digest_files_works() {
        let contents: [&[u8]; 4] = [b"", b"content of file 1\n", &[0u8; 1000], b"abc"];
        let (_dir, paths) = test_support::temp_files(&contents).unwrap();

        let results = digest_files(&paths, Algorithm::Sha512);
        assert_eq!(results.len(), contents.len());
        for (result, content) in results.iter().zip(contents) {
            let digest = result.as_ref().unwrap();
            assert_eq!(digest.algorithm(), Algorithm::Sha512);
            assert_eq!(*digest, AnyDigest::Sha512(hash512(content)));
        }
        assert_eq!(
            results[3].as_ref().unwrap().to_string(),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn digest_files_handles_missing() {
        let results = digest_files(&["nonexistent_file_12345.txt"], Algorithm::Sha256);
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }

    #[test]
    fn any_digest_reports_width() {
        for algorithm in [
            Algorithm::Sha224,
            Algorithm::Sha256,
            Algorithm::Sha384,
            Algorithm::Sha512,
        ] {
            let digest = algorithm.digest(b"abc");
            assert_eq!(digest.as_bytes().len() * 8, algorithm.bits());
            assert_eq!(digest.as_ref(), digest.as_bytes());
        }
    }
}
