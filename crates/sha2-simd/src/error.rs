use thiserror::Error;

use crate::dispatcher::Backend;

/// Errors surfaced by the explicit-backend entry points and the digest
/// conversion helpers.
///
/// The auto-selecting hash functions are total and never return an error.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Sha2Error {
    /// The requested backend needs a CPU capability this machine lacks.
    #[error("{backend} backend is not available on this CPU")]
    BackendUnavailable {
        /// Backend that was requested.
        backend: Backend,
    },
    /// The requested backend has no implementation for this digest width.
    #[error("{backend} backend does not implement SHA-{bits}")]
    UnsupportedFamily {
        /// Backend that was requested.
        backend: Backend,
        /// Digest width in bits.
        bits: usize,
    },
    /// Reserving memory for a materialised padded message failed.
    #[error("failed to allocate {bytes} bytes for the padded message")]
    AllocationFailed {
        /// Size of the attempted allocation.
        bytes: usize,
    },
    /// A digest was built from the wrong number of bytes.
    #[error("digest requires {expected} bytes, received {actual}")]
    InvalidDigestLength {
        /// Digest length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// A hex-encoded digest contained a non-hex character.
    #[error("invalid hex digit at position {position}")]
    InvalidHex {
        /// Byte offset of the offending character.
        position: usize,
    },
}
