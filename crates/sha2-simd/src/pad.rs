//! Message preprocessing: padding and block segmentation.
//!
//! A padded message is the message itself, a single `1` bit (the `0x80`
//! byte), zero bytes up to `BLOCK - LEN_FIELD` modulo `BLOCK`, and the
//! message bit-length as a big-endian integer filling the last `LEN_FIELD`
//! bytes. [`Padded`] exposes that sequence without copying the message:
//! every complete message block is borrowed in place and only the one or
//! two tail blocks are built on the stack.

use crate::Sha2Error;
use crate::consts::{BLOCK_LEN_32, BLOCK_LEN_64, LEN_FIELD_32, LEN_FIELD_64};

/// Padded view of a message for the 32-bit family (64-byte blocks, 64-bit
/// length field).
pub type Padded32<'a> = Padded<'a, BLOCK_LEN_32, LEN_FIELD_32>;

/// Padded view of a message for the 64-bit family (128-byte blocks, 128-bit
/// length field).
pub type Padded64<'a> = Padded<'a, BLOCK_LEN_64, LEN_FIELD_64>;

/// The ordered block sequence of a padded message.
#[derive(Clone, Debug)]
pub struct Padded<'a, const BLOCK: usize, const LEN_FIELD: usize> {
    full: &'a [[u8; BLOCK]],
    tail: [[u8; BLOCK]; 2],
    tail_len: usize,
}

impl<'a, const BLOCK: usize, const LEN_FIELD: usize> Padded<'a, BLOCK, LEN_FIELD> {
    /// Pad `message`.
    ///
    /// The tail holds the trailing partial block (possibly empty), the `0x80`
    /// marker and the length field. When fewer than `LEN_FIELD + 1` bytes
    /// remain after the partial block, the length field spills into a second
    /// tail block.
    pub fn new(message: &'a [u8]) -> Self {
        let (full, rest) = message.as_chunks::<BLOCK>();

        let mut tail = [[0u8; BLOCK]; 2];
        tail[0][..rest.len()].copy_from_slice(rest);
        tail[0][rest.len()] = 0x80;

        let tail_len = if rest.len() + 1 + LEN_FIELD > BLOCK { 2 } else { 1 };

        // The field is the low LEN_FIELD bytes of the big-endian bit count.
        // The 32-bit family therefore encodes the length modulo 2^64.
        let bit_len = (message.len() as u128).wrapping_mul(8).to_be_bytes();
        tail[tail_len - 1][BLOCK - LEN_FIELD..].copy_from_slice(&bit_len[16 - LEN_FIELD..]);

        Self {
            full,
            tail,
            tail_len,
        }
    }

    /// Total number of blocks, always at least one.
    pub fn block_count(&self) -> usize {
        self.full.len() + self.tail_len
    }

    /// Block `index` of the padded message.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.block_count()`.
    pub fn block(&self, index: usize) -> &[u8; BLOCK] {
        match self.full.get(index) {
            Some(block) => block,
            None => &self.tail[..self.tail_len][index - self.full.len()],
        }
    }

    /// Complete message blocks, borrowed from the message.
    pub fn full_blocks(&self) -> &'a [[u8; BLOCK]] {
        self.full
    }

    /// The one or two blocks holding the message tail and padding.
    pub fn tail_blocks(&self) -> &[[u8; BLOCK]] {
        &self.tail[..self.tail_len]
    }

    /// All blocks in message order.
    pub fn blocks(&self) -> impl Iterator<Item = &[u8; BLOCK]> + '_ {
        self.full.iter().chain(self.tail_blocks())
    }

    /// Materialise the padded message into one contiguous buffer.
    ///
    /// Fails with [`Sha2Error::AllocationFailed`] instead of aborting when
    /// the buffer cannot be reserved.
    pub fn try_to_vec(&self) -> Result<Vec<u8>, Sha2Error> {
        let bytes = self
            .block_count()
            .checked_mul(BLOCK)
            .ok_or(Sha2Error::AllocationFailed { bytes: usize::MAX })?;

        let mut out = reserve(bytes)?;
        for block in self.blocks() {
            out.extend_from_slice(block);
        }
        Ok(out)
    }
}

fn reserve(bytes: usize) -> Result<Vec<u8>, Sha2Error> {
    let mut out = Vec::new();
    out.try_reserve_exact(bytes)
        .map_err(|_| Sha2Error::AllocationFailed { bytes })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit_len_32(block: &[u8; 64]) -> u64 {
        u64::from_be_bytes(block[56..].try_into().expect("8 bytes"))
    }

    fn bit_len_64(block: &[u8; 128]) -> u128 {
        u128::from_be_bytes(block[112..].try_into().expect("16 bytes"))
    }

    #[test]
    fn empty_message_is_one_block() {
        let padded = Padded32::new(b"");
        assert_eq!(padded.block_count(), 1);
        let block = padded.block(0);
        assert_eq!(block[0], 0x80);
        assert!(block[1..].iter().all(|&b| b == 0));

        let padded = Padded64::new(b"");
        assert_eq!(padded.block_count(), 1);
        assert_eq!(padded.block(0)[0], 0x80);
        assert_eq!(bit_len_64(padded.block(0)), 0);
    }

    #[test]
    fn abc_matches_fips_example() {
        let padded = Padded32::new(b"abc");
        assert_eq!(padded.block_count(), 1);
        let block = padded.block(0);
        assert_eq!(&block[..4], &[0x61, 0x62, 0x63, 0x80]);
        assert!(block[4..56].iter().all(|&b| b == 0));
        assert_eq!(bit_len_32(block), 24);
    }

    #[test]
    fn last_single_block_length_stays_in_one_block() {
        // 55 bytes + 0x80 + 8 length bytes = 64.
        let msg = [0x5a; 55];
        let padded = Padded32::new(&msg);
        assert_eq!(padded.block_count(), 1);
        assert_eq!(padded.block(0)[55], 0x80);
        assert_eq!(bit_len_32(padded.block(0)), 55 * 8);

        // 111 bytes + 0x80 + 16 length bytes = 128.
        let msg = [0x5a; 111];
        let padded = Padded64::new(&msg);
        assert_eq!(padded.block_count(), 1);
        assert_eq!(bit_len_64(padded.block(0)), 111 * 8);
    }

    #[test]
    fn length_field_boundary_spills_into_second_block() {
        let msg = [0x5a; 56];
        let padded = Padded32::new(&msg);
        assert_eq!(padded.block_count(), 2);
        assert_eq!(padded.block(0)[56], 0x80);
        assert!(padded.block(0)[57..].iter().all(|&b| b == 0));
        assert!(padded.block(1)[..56].iter().all(|&b| b == 0));
        assert_eq!(bit_len_32(padded.block(1)), 56 * 8);

        let msg = [0x5a; 112];
        let padded = Padded64::new(&msg);
        assert_eq!(padded.block_count(), 2);
        assert_eq!(padded.block(0)[112], 0x80);
        assert_eq!(bit_len_64(padded.block(1)), 112 * 8);
    }

    #[test]
    fn exact_block_multiple_gets_a_padding_block() {
        let msg = test_support::pattern(128);
        let padded = Padded32::new(&msg);
        assert_eq!(padded.full_blocks().len(), 2);
        assert_eq!(padded.tail_blocks().len(), 1);
        assert_eq!(padded.block(2)[0], 0x80);
        assert_eq!(bit_len_32(padded.block(2)), 1024);
    }

    #[test]
    fn full_blocks_borrow_the_message() {
        let msg = test_support::pattern(200);
        let padded = Padded32::new(&msg);
        assert_eq!(padded.block_count(), 4);
        assert_eq!(padded.block(1)[..], msg[64..128]);
        assert_eq!(padded.block(3)[..8], msg[192..200]);
        assert_eq!(padded.block(3)[8], 0x80);
    }

    #[test]
    fn blocks_iterator_matches_random_access() {
        let msg = test_support::pattern(300);
        let padded = Padded64::new(&msg);
        let collected: Vec<_> = padded.blocks().collect();
        assert_eq!(collected.len(), padded.block_count());
        for (i, block) in collected.iter().enumerate() {
            assert_eq!(*block, padded.block(i));
        }
    }

    #[test]
    fn materialised_length_is_block_multiple() {
        for len in test_support::boundary_lengths(64, 8) {
            let msg = test_support::pattern(len);
            let bytes = Padded32::new(&msg).try_to_vec().expect("small allocation");
            assert_eq!(bytes.len() % 64, 0, "len={len}");
            assert!(bytes.len() >= len + 9, "len={len}");
            assert!(bytes.len() < len + 9 + 64, "len={len}");
            assert_eq!(&bytes[..len], &msg[..]);
            assert_eq!(bytes[len], 0x80);
        }
    }

    #[test]
    fn oversized_reservation_reports_allocation_failure() {
        assert_eq!(
            reserve(usize::MAX),
            Err(Sha2Error::AllocationFailed { bytes: usize::MAX })
        );
        let err = reserve(isize::MAX as usize + 1).expect_err("exceeds isize::MAX");
        assert!(matches!(err, Sha2Error::AllocationFailed { .. }));
        assert!(reserve(256).expect("small allocation").capacity() >= 256);
    }

    #[test]
    #[should_panic]
    fn block_past_the_end_panics() {
        let padded = Padded32::new(b"abc");
        let _ = padded.block(1);
    }
}
