//! Whole-input hashing with the adaptive block-size search.
//!
//! A good spamsum digest fills most of its 64 left-half characters. Since
//! the number of pieces an input yields is only known after hashing it, the
//! search starts at the smallest block size whose *expected* piece count
//! fits the digest, then halves and rehashes from the start while the left
//! half comes out less than half full. Small inputs therefore cost a few
//! extra passes; the block size converges within at most ~30 halvings.

use std::io::{self, Read, Seek, SeekFrom};

use tracing::trace;

use crate::piecewise::{self, Digest, PiecewiseState};

/// Read granularity for seekable sources.
const READ_SIZE: usize = 8192;

/// Passes yielding at most this many left characters retry at half the
/// block size.
const HALF_FULL: usize = Digest::MAX_LEFT_LEN / 2;

/// Hashes a byte slice, selecting the block size adaptively.
///
/// Because the block-size search must rehash from the start, the digest of
/// a slice is computed in up to ~30 passes over it. The result cannot be
/// extended with more data; use [`StreamHasher`](crate::StreamHasher) when
/// the input arrives incrementally.
///
/// # Examples
///
/// ```
/// let digest = spamsum::hash_bytes(b"Hello, world!");
/// assert_eq!(digest.to_string(), "3:a6/E:asE");
/// ```
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> Digest {
    let mut state = PiecewiseState::new();
    let mut digest = Digest::with_block_size(initial_block_size(bytes.len() as u64));

    loop {
        piecewise::process_chunk(&mut state, &mut digest, bytes);
        piecewise::flush_tail(&state, &mut digest);

        match next_block_size(&digest) {
            Some(halved) => {
                trace!(
                    block_size = digest.block_size(),
                    left_len = digest.left().len(),
                    "left half under-filled, halving block size"
                );
                digest = Digest::with_block_size(halved);
                state.reset();
            }
            None => {
                trace!(
                    block_size = digest.block_size(),
                    left_len = digest.left().len(),
                    "block size selected"
                );
                return digest;
            }
        }
    }
}

/// Hashes a rewindable byte source of known length.
///
/// The source is consumed in 8 KiB reads and rewound to offset zero at the
/// start of every block-size pass, so it must tolerate repeated traversal.
/// Sources that cannot seek have to be buffered by the caller (for a slice,
/// prefer [`hash_bytes`]).
///
/// # Errors
///
/// Propagates any [`io::Error`] from reading or rewinding; the partially
/// computed digest is discarded.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
///
/// let mut source = Cursor::new(b"Hello, world!".to_vec());
/// let digest = spamsum::hash_read_seeker(&mut source, 13).unwrap();
/// assert_eq!(digest, spamsum::hash_bytes(b"Hello, world!"));
/// ```
pub fn hash_read_seeker<R: Read + Seek>(source: &mut R, length: u64) -> io::Result<Digest> {
    let mut state = PiecewiseState::new();
    let mut digest = Digest::with_block_size(initial_block_size(length));
    let mut buffer = vec![0u8; READ_SIZE];

    loop {
        source.seek(SeekFrom::Start(0))?;

        loop {
            match source.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => piecewise::process_chunk(&mut state, &mut digest, &buffer[..n]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        piecewise::flush_tail(&state, &mut digest);

        match next_block_size(&digest) {
            Some(halved) => {
                trace!(
                    block_size = digest.block_size(),
                    left_len = digest.left().len(),
                    "left half under-filled, halving block size"
                );
                digest = Digest::with_block_size(halved);
                state.reset();
            }
            None => {
                trace!(
                    block_size = digest.block_size(),
                    left_len = digest.left().len(),
                    "block size selected"
                );
                return Ok(digest);
            }
        }
    }
}

/// Smallest `3 · 2^k` block size whose expected piece count covers `length`.
fn initial_block_size(length: u64) -> u32 {
    let mut block_size = Digest::MIN_BLOCK_SIZE;
    while u64::from(block_size) * (Digest::MAX_LEFT_LEN as u64) < length {
        if block_size == Digest::MIN_BLOCK_SIZE << 30 {
            // Inputs this long are outside the supported range; the block
            // size stays within 32 bits.
            break;
        }
        block_size *= 2;
    }
    block_size
}

/// The next, halved block size to try, or `None` once this pass stands.
fn next_block_size(digest: &Digest) -> Option<u32> {
    if digest.block_size() > Digest::MIN_BLOCK_SIZE && digest.left().len() <= HALF_FULL {
        Some(digest.block_size() / 2)
    } else {
        None
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    proptest! {
        /// Property: both halves respect their length caps.
        #[test]
        fn halves_respect_caps(data: Vec<u8>) {
            let digest = hash_bytes(&data);
            prop_assert!(digest.left().len() <= Digest::MAX_LEFT_LEN);
            prop_assert!(digest.right().len() <= Digest::MAX_RIGHT_LEN);
        }

        /// Property: the selected block size is always of the form `3 · 2^k`.
        #[test]
        fn block_size_is_three_times_a_power_of_two(data: Vec<u8>) {
            let block_size = hash_bytes(&data).block_size();
            prop_assert_eq!(block_size % 3, 0);
            prop_assert!((block_size / 3).is_power_of_two());
        }

        /// Property: the digest round-trips through its text form.
        #[test]
        fn digest_round_trips_through_text(data: Vec<u8>) {
            let digest = hash_bytes(&data);
            let reparsed: Digest = digest.to_string().parse().unwrap();
            prop_assert_eq!(digest, reparsed);
        }

        /// Property: hashing through a cursor agrees with slice hashing.
        #[test]
        fn cursor_and_slice_agree(data: Vec<u8>) {
            let mut source = Cursor::new(data.clone());
            let via_reader = hash_read_seeker(&mut source, data.len() as u64).unwrap();
            prop_assert_eq!(via_reader, hash_bytes(&data));
        }
    }
}
