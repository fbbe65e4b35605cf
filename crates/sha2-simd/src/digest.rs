//! Fixed-size digest values.

use std::fmt;

use crate::Sha2Error;
use crate::util::{store_be32, store_be64};

/// Largest digest in the family (SHA-512), in bytes.
const MAX_LEN: usize = 64;

/// A SHA-2 digest of `BITS` bits.
///
/// Only `BITS` of 224, 256, 384 and 512 are accepted; any other width fails
/// to compile as soon as [`Digest::LEN`] is evaluated. The bytes are the
/// FIPS 180-4 canonical output: state words in big-endian order, truncated
/// to `BITS / 8` bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest<const BITS: usize> {
    bytes: [u8; MAX_LEN],
}

/// SHA-224 digest (28 bytes).
pub type Digest224 = Digest<224>;
/// SHA-256 digest (32 bytes).
pub type Digest256 = Digest<256>;
/// SHA-384 digest (48 bytes).
pub type Digest384 = Digest<384>;
/// SHA-512 digest (64 bytes).
pub type Digest512 = Digest<512>;

impl<const BITS: usize> Digest<BITS> {
    /// Digest length in bytes.
    pub const LEN: usize = {
        assert!(
            BITS == 224 || BITS == 256 || BITS == 384 || BITS == 512,
            "SHA-2 digests are 224, 256, 384 or 512 bits"
        );
        BITS / 8
    };

    /// Format a 32-bit-family state, keeping the leading `LEN` bytes.
    pub(crate) fn from_state32(state: &[u32; 8]) -> Self {
        let mut bytes = [0u8; MAX_LEN];
        store_be32(state, &mut bytes[..Self::LEN]);
        Self { bytes }
    }

    /// Format a 64-bit-family state, keeping the leading `LEN` bytes.
    pub(crate) fn from_state64(state: &[u64; 8]) -> Self {
        let mut bytes = [0u8; MAX_LEN];
        store_be64(state, &mut bytes[..Self::LEN]);
        Self { bytes }
    }

    /// The digest bytes, exactly `BITS / 8` of them.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..Self::LEN]
    }

    /// The digest bytes as an owned vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Parse a lowercase or uppercase hex rendering.
    ///
    /// An odd number of digits leaves the last one unpaired and is reported
    /// as [`Sha2Error::InvalidHex`] at that digit.
    pub fn from_hex(hex: &str) -> Result<Self, Sha2Error> {
        let raw = hex.as_bytes();
        if raw.len() % 2 == 1 {
            return Err(Sha2Error::InvalidHex {
                position: raw.len() - 1,
            });
        }
        if raw.len() != Self::LEN * 2 {
            return Err(Sha2Error::InvalidDigestLength {
                expected: Self::LEN,
                actual: raw.len() / 2,
            });
        }

        let mut bytes = [0u8; MAX_LEN];
        for (i, pair) in raw.chunks_exact(2).enumerate() {
            let hi = hex_value(pair[0]).ok_or(Sha2Error::InvalidHex { position: 2 * i })?;
            let lo = hex_value(pair[1]).ok_or(Sha2Error::InvalidHex {
                position: 2 * i + 1,
            })?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self { bytes })
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl<const BITS: usize> AsRef<[u8]> for Digest<BITS> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const BITS: usize> TryFrom<&[u8]> for Digest<BITS> {
    type Error = Sha2Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != Self::LEN {
            return Err(Sha2Error::InvalidDigestLength {
                expected: Self::LEN,
                actual: value.len(),
            });
        }
        let mut bytes = [0u8; MAX_LEN];
        bytes[..Self::LEN].copy_from_slice(value);
        Ok(Self { bytes })
    }
}

impl<const BITS: usize> PartialEq<[u8]> for Digest<BITS> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<const BITS: usize> fmt::LowerHex for Digest<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl<const BITS: usize> fmt::Display for Digest<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl<const BITS: usize> fmt::Debug for Digest<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest<{BITS}>({self:x})")
    }
}
