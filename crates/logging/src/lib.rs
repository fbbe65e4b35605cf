#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the tracing conventions shared across the sha2-simd
//! workspace. Library code emits events through the target macros
//! ([`trace_dispatch!`], [`trace_batch!`], [`trace_files!`]) and never
//! installs a subscriber; benches and debugging sessions opt in through
//! [`init`] (feature `subscriber`).
//!
//! # Targets
//!
//! | Macro | Target | Level |
//! |---|---|---|
//! | [`trace_dispatch!`] | `sha2::dispatch` | debug |
//! | [`trace_batch!`] | `sha2::batch` | trace |
//! | [`trace_files!`] | `sha2::files` | debug |
//!
//! # Examples
//!
//! ```
//! logging::trace_dispatch!(backend = "portable", "selected backend");
//! ```

pub use tracing;

mod tracing_macros;

pub use tracing_macros::{BATCH, DISPATCH, FILES};

#[cfg(feature = "subscriber")]
mod subscriber;

#[cfg(feature = "subscriber")]
pub use subscriber::{DEFAULT_DIRECTIVES, init, try_init};
