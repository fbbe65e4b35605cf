//! Portable compression functions.
//!
//! This is the reference backend: it runs everywhere, needs no CPU
//! capability, and every other backend is tested against it bit for bit.

mod sha256;
mod sha512;

pub use sha256::{compress256, compress256_blocks};
pub use sha512::{compress512, compress512_blocks};
