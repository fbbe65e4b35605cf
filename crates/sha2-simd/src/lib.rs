//! SHA-224, SHA-256, SHA-384 and SHA-512 (FIPS 180-4) with interchangeable
//! compression backends.
//!
//! Three backends implement the compression function:
//!
//! - a portable scalar core for both word widths,
//! - multi-lane SIMD cores (AVX2, NEON) that hash several independent
//!   messages at once, one per vector lane,
//! - SHA instruction kernels (x86 SHA extensions, ARMv8 SHA2) for
//!   SHA-224/256.
//!
//! The free functions select the fastest backend the CPU supports, once per
//! process. Every backend produces identical digests; the choice only
//! changes speed.
//!
//! # Example
//!
//! ```
//! use sha2_simd::{hash256, hash256_batch};
//!
//! // Single hash
//! let digest = hash256(b"abc");
//! assert_eq!(
//!     digest.to_hex(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//!
//! // Batch hash (uses SIMD lanes when available)
//! let inputs = [b"input1".as_slice(), b"input2", b"input3"];
//! let digests = hash256_batch(&inputs);
//! assert_eq!(digests.len(), 3);
//! assert_eq!(digests[1], hash256(b"input2"));
//! ```
//!
//! Explicit backends are available for testing and benchmarking:
//!
//! ```
//! use sha2_simd::{Backend, hash512, hash512_with};
//!
//! let portable = hash512_with(Backend::Portable, b"").unwrap();
//! assert_eq!(portable, hash512(b""));
//! assert!(hash512_with(Backend::ShaNi, b"").is_err());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod consts;
mod cpu;
mod digest;
mod dispatcher;
mod error;
#[allow(unsafe_code)]
#[allow(unsafe_op_in_unsafe_fn)]
mod hw;
pub mod pad;
#[cfg(feature = "rayon")]
mod rayon_support;
pub mod scalar;
#[allow(unsafe_code)]
#[allow(unsafe_op_in_unsafe_fn)]
mod simd;
pub mod util;

pub use cpu::CpuFeatures;
pub use digest::{Digest, Digest224, Digest256, Digest384, Digest512};
pub use dispatcher::{
    ActiveBackends, Backend, BackendKind, DispatchPolicy, Dispatcher, global, hash224_batch_with,
    hash224_with, hash256_batch_with, hash256_with, hash384_batch_with, hash384_with,
    hash512_batch_with, hash512_with,
};
pub use error::Sha2Error;
pub use pad::{Padded, Padded32, Padded64};
#[cfg(feature = "rayon")]
#[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
pub use rayon_support::{Algorithm, AnyDigest, ParallelSha2, digest_files};

/// SHA-224 digest of `message`.
pub fn hash224(message: &[u8]) -> Digest224 {
    global().hash224(message)
}

/// SHA-256 digest of `message`.
pub fn hash256(message: &[u8]) -> Digest256 {
    global().hash256(message)
}

/// SHA-384 digest of `message`.
pub fn hash384(message: &[u8]) -> Digest384 {
    global().hash384(message)
}

/// SHA-512 digest of `message`.
pub fn hash512(message: &[u8]) -> Digest512 {
    global().hash512(message)
}

/// SHA-224 digests for multiple inputs.
///
/// Groups inputs by the SIMD lane width when a SIMD backend is active.
/// Returns digests in the same order as inputs.
pub fn hash224_batch<T: AsRef<[u8]>>(inputs: &[T]) -> Vec<Digest224> {
    global().hash224_batch(inputs)
}

/// SHA-256 digests for multiple inputs, in input order.
pub fn hash256_batch<T: AsRef<[u8]>>(inputs: &[T]) -> Vec<Digest256> {
    global().hash256_batch(inputs)
}

/// SHA-384 digests for multiple inputs, in input order.
pub fn hash384_batch<T: AsRef<[u8]>>(inputs: &[T]) -> Vec<Digest384> {
    global().hash384_batch(inputs)
}

/// SHA-512 digests for multiple inputs, in input order.
pub fn hash512_batch<T: AsRef<[u8]>>(inputs: &[T]) -> Vec<Digest512> {
    global().hash512_batch(inputs)
}

/// Get the backends the global dispatcher selected.
///
/// Useful for logging or diagnostics.
pub fn active_backends() -> ActiveBackends {
    global().backends()
}
