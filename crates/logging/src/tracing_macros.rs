//! crates/logging/src/tracing_macros.rs
//! Convenience macros for sha2-simd tracing.
//!
//! These macros wrap the standard tracing macros with the targets used by
//! the hashing subsystems, so filters such as `sha2::dispatch=debug` select
//! exactly one subsystem.

/// Target for backend selection and CPU capability detection.
pub const DISPATCH: &str = "sha2::dispatch";

/// Target for batched (multi-lane) hashing.
pub const BATCH: &str = "sha2::batch";

/// Target for parallel file hashing.
pub const FILES: &str = "sha2::files";

/// Emit a backend dispatch trace.
///
/// # Example
/// ```ignore
/// trace_dispatch!(backend = "sha-ni", "selected backend for 32-bit family");
/// ```
#[macro_export]
macro_rules! trace_dispatch {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "sha2::dispatch", $($arg)*)
    };
}

/// Emit a batch hashing trace.
///
/// # Example
/// ```ignore
/// trace_batch!(inputs = 17, lanes = 8, "hashing batch");
/// ```
#[macro_export]
macro_rules! trace_batch {
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: "sha2::batch", $($arg)*)
    };
}

/// Emit a file hashing trace.
///
/// # Example
/// ```ignore
/// trace_files!(path = %path.display(), "read failed");
/// ```
#[macro_export]
macro_rules! trace_files {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "sha2::files", $($arg)*)
    };
}
