//! Shared inner loop of the context-triggered piecewise hash, and the
//! [`Digest`] it produces.
//!
//! Both drivers (the adaptive whole-input search in [`crate::hash`] and the
//! fixed-block-size [`crate::StreamHasher`]) feed bytes through the same
//! pair of free functions here, holding a [`PiecewiseState`] and the
//! [`Digest`] being built. Each byte advances the rolling trigger hash and
//! two piece accumulators; when a trigger condition fires, the accumulator
//! for that half is folded into a single base64 character and appended to
//! the digest.

mod digest;
mod error;

pub use self::digest::Digest;
pub use self::error::{DigestHalf, ParseError};

use crate::rolling::RollingHash;

/// Seed of the piece accumulators. spamsum deliberately deviates from the
/// standard FNV-1 offset basis here.
const FNV_OFFSET: u32 = 0x28021967;

/// Standard 32-bit FNV prime.
const FNV_PRIME: u32 = 16777619;

/// Alphabet used to render one 6-bit piece hash per character.
pub(crate) const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// FNV-1 with spamsum's non-standard offset basis.
///
/// Multiply-then-xor order matters for output compatibility; FNV-1a would
/// produce different piece characters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Fnv32(u32);

impl Fnv32 {
    pub(crate) const fn new() -> Self {
        Self(FNV_OFFSET)
    }

    #[inline]
    pub(crate) fn update(&mut self, byte: u8) {
        self.0 = self.0.wrapping_mul(FNV_PRIME) ^ u32::from(byte);
    }

    /// Starts a fresh piece without allocating a new accumulator.
    #[inline]
    pub(crate) const fn reseed(&mut self) {
        self.0 = FNV_OFFSET;
    }

    /// Folds the accumulator into a single base64 character.
    #[inline]
    pub(crate) const fn piece_char(self) -> u8 {
        ALPHABET[(self.0 % 64) as usize]
    }
}

/// Mutable hashing state shared by the whole-input and streaming drivers.
///
/// The rolling trigger hash is continuous over the whole input; only the
/// piece accumulators reseed when a piece is emitted.
#[derive(Clone, Debug)]
pub(crate) struct PiecewiseState {
    rolling: RollingHash,
    left: Fnv32,
    right: Fnv32,
}

impl PiecewiseState {
    pub(crate) const fn new() -> Self {
        Self {
            rolling: RollingHash::new(),
            left: Fnv32::new(),
            right: Fnv32::new(),
        }
    }

    /// Current trigger value; zero until the first byte is consumed.
    pub(crate) const fn trigger(&self) -> u32 {
        self.rolling.value()
    }

    /// Returns to the freshly-constructed state.
    pub(crate) fn reset(&mut self) {
        self.rolling.reset();
        self.left.reseed();
        self.right.reseed();
    }
}

/// Feeds a chunk of input through the piecewise hash.
///
/// The left trigger fires when the rolling value is `block_size - 1` modulo
/// `block_size`; the right trigger uses twice the block size, so the right
/// half observes pieces of twice the expected length. The doubled block size
/// wraps modulo 2^32 exactly like the reference's unsigned arithmetic, which
/// keeps hash output bit-identical at the 32-bit extreme.
///
/// Once a half's cursor reaches its final slot, the slot is overwritten in
/// place without advancing or reseeding: the remainder of the input, however
/// long, collapses into that one observable character.
pub(crate) fn process_chunk(state: &mut PiecewiseState, digest: &mut Digest, chunk: &[u8]) {
    let block_size = digest.block_size;
    let double = block_size.wrapping_mul(2);

    for &byte in chunk {
        let trigger = state.rolling.roll(byte);
        state.left.update(byte);
        state.right.update(byte);

        if trigger % block_size == block_size - 1 {
            digest.left[digest.left_len] = state.left.piece_char();
            if digest.left_len < Digest::MAX_LEFT_LEN - 1 {
                digest.left_len += 1;
                state.left.reseed();
            }
        }

        if double != 0 && trigger % double == double - 1 {
            digest.right[digest.right_len] = state.right.piece_char();
            if digest.right_len < Digest::MAX_RIGHT_LEN - 1 {
                digest.right_len += 1;
                state.right.reseed();
            }
        }
    }
}

/// Emits the final character of each half, provided any input was consumed.
///
/// The trigger value is zero only for the empty input (or a vanishing
/// wrap-around coincidence the reference also treats as empty), so an input
/// that never fired a trigger still produces a one-character digest per
/// half. The state itself is left untouched; streaming callers flush a
/// clone and keep writing.
pub(crate) fn flush_tail(state: &PiecewiseState, digest: &mut Digest) {
    if state.trigger() == 0 {
        return;
    }

    debug_assert!(digest.left_len < Digest::MAX_LEFT_LEN);
    debug_assert!(digest.right_len < Digest::MAX_RIGHT_LEN);

    digest.left[digest.left_len] = state.left.piece_char();
    digest.left_len += 1;
    digest.right[digest.right_len] = state.right.piece_char();
    digest.right_len += 1;
}
