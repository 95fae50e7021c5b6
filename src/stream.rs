//! Streaming hasher with a caller-chosen fixed block size.
//!
//! The adaptive search in [`crate::hash`] needs to rewind its input, which
//! rules it out for data that only arrives once. [`StreamHasher`] trades
//! the adaptive block size for incremental operation: the caller commits to
//! a block size up front and feeds bytes in slices of any shape.

use core::fmt;
use std::io;

use digest::consts::U64;
use digest::{FixedOutput, FixedOutputReset, Output, OutputSizeUser, Reset, Update};

use crate::piecewise::{self, Digest, PiecewiseState};

/// Incremental spamsum hasher over a fixed block size.
///
/// Writes never fail and may be split arbitrarily; any partition of the
/// input into chunks produces the same digest. The current digest can be
/// inspected at any point without disturbing the state, via
/// [`digest`](Self::digest), the `Display` impl, or the `digest` crate's
/// `FixedOutput` traits, so writing may simply continue afterwards.
///
/// Choose the block size to fit the expected input length: once roughly
/// `64 · block_size` bytes have been written, further input is absorbed
/// into the final digest character and contributes little. For inputs that
/// are available in full, prefer [`hash_bytes`](crate::hash_bytes), which
/// picks the block size itself.
///
/// # Examples
///
/// ```
/// use spamsum::StreamHasher;
///
/// let mut hasher = StreamHasher::new(48);
/// hasher.write(b"streamed ");
/// hasher.write(b"in two chunks");
///
/// let mut whole = StreamHasher::new(48);
/// whole.write(b"streamed in two chunks");
/// assert_eq!(hasher.to_string(), whole.to_string());
/// ```
#[derive(Clone, Debug)]
pub struct StreamHasher {
    state: PiecewiseState,
    digest: Digest,
}

impl StreamHasher {
    /// Byte width of the fixed binary sum.
    pub const SUM_LEN: usize = Digest::MAX_LEFT_LEN;

    /// Opens a streaming hasher over the given block size.
    ///
    /// Block sizes of the form `3 · 2^k` match what the adaptive search
    /// produces; other positive values are accepted and hash consistently,
    /// but their digests only compare against equal or 2:1-related block
    /// sizes.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero.
    #[must_use]
    pub fn new(block_size: u32) -> Self {
        assert!(block_size > 0, "block size must be positive");
        Self {
            state: PiecewiseState::new(),
            digest: Digest::with_block_size(block_size),
        }
    }

    /// The block size this hasher was opened with.
    #[inline]
    #[must_use]
    pub const fn block_size(&self) -> u32 {
        self.digest.block_size()
    }

    /// Feeds a slice of input bytes. Never fails.
    pub fn write(&mut self, bytes: &[u8]) {
        piecewise::process_chunk(&mut self.state, &mut self.digest, bytes);
    }

    /// Finished digest of the bytes written so far.
    ///
    /// The closing tail character is flushed into a copy of the state, so
    /// the hasher itself stays live: later calls after more writes behave
    /// as if this snapshot had never been taken.
    #[must_use]
    pub fn digest(&self) -> Digest {
        let mut digest = self.digest;
        piecewise::flush_tail(&self.state, &mut digest);
        digest
    }

    /// Fixed-width binary form: the left half, zero-padded to 64 bytes.
    #[must_use]
    pub fn sum(&self) -> [u8; Self::SUM_LEN] {
        let mut out = [0u8; Self::SUM_LEN];
        self.sum_into(&mut out);
        out
    }

    /// Writes the fixed-width binary form into a caller-owned buffer.
    ///
    /// The padding is zero bytes, not base64 `'='`; the digest characters
    /// run up to the first zero byte or the end of the buffer.
    pub fn sum_into(&self, out: &mut [u8; Self::SUM_LEN]) {
        let digest = self.digest();
        out.fill(0);
        out[..digest.left().len()].copy_from_slice(digest.left());
    }

    /// Returns to the initial state while retaining the block size.
    pub fn reset(&mut self) {
        self.state.reset();
        self.digest.clear();
    }
}

/// Renders the canonical text of the current state; equivalent to
/// `self.digest().to_string()`.
impl fmt::Display for StreamHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.digest(), f)
    }
}

impl Update for StreamHasher {
    fn update(&mut self, data: &[u8]) {
        self.write(data);
    }
}

impl OutputSizeUser for StreamHasher {
    type OutputSize = U64;
}

impl FixedOutput for StreamHasher {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.sum());
    }
}

impl Reset for StreamHasher {
    fn reset(&mut self) {
        Self::reset(self);
    }
}

impl FixedOutputReset for StreamHasher {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.sum());
        Self::reset(self);
    }
}

/// Byte-stream front-end, so the hasher slots into `io::copy` and friends.
impl io::Write for StreamHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        StreamHasher::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
