//! Digest value type and its canonical textual form.
//!
//! A digest is the triple rendered as `blocksize:left:right`: a decimal
//! block size and two runs of base64 characters, one 6-bit piece hash per
//! character. The right half hashes pieces of twice the block size, which
//! is what lets the comparator align digests whose block sizes differ by a
//! factor of two.

use core::fmt;
use std::str::FromStr;

use super::error::{DigestHalf, ParseError};

/// A context-triggered piecewise hash of one input.
///
/// Produced by [`hash_bytes`](crate::hash_bytes),
/// [`hash_read_seeker`](crate::hash_read_seeker), or
/// [`StreamHasher::digest`](crate::StreamHasher::digest), and round-trips
/// through the canonical text form:
///
/// ```
/// use spamsum::Digest;
///
/// let digest: Digest = "49152:dihMNzhZt62oh9+onrqMPr/KwJsvD/mMplt:Hxxpj"
///     .parse()
///     .unwrap();
/// assert_eq!(digest.block_size(), 49152);
/// assert_eq!(
///     digest.to_string(),
///     "49152:dihMNzhZt62oh9+onrqMPr/KwJsvD/mMplt:Hxxpj"
/// );
/// ```
#[derive(Clone, Copy)]
pub struct Digest {
    pub(crate) block_size: u32,
    pub(crate) left: [u8; Self::MAX_LEFT_LEN],
    pub(crate) right: [u8; Self::MAX_RIGHT_LEN],
    pub(crate) left_len: usize,
    pub(crate) right_len: usize,
}

impl Digest {
    /// Maximum number of characters in the left half.
    pub const MAX_LEFT_LEN: usize = 64;

    /// Maximum number of characters in the right half.
    pub const MAX_RIGHT_LEN: usize = 32;

    /// Smallest block size the adaptive search will select.
    pub const MIN_BLOCK_SIZE: u32 = 3;

    /// The digest of the empty input.
    pub const EMPTY: Self = Self::with_block_size(Self::MIN_BLOCK_SIZE);

    /// An empty digest carrying the given block size.
    pub(crate) const fn with_block_size(block_size: u32) -> Self {
        Self {
            block_size,
            left: [0; Self::MAX_LEFT_LEN],
            right: [0; Self::MAX_RIGHT_LEN],
            left_len: 0,
            right_len: 0,
        }
    }

    /// Drops both halves while retaining the block size.
    pub(crate) fn clear(&mut self) {
        self.left = [0; Self::MAX_LEFT_LEN];
        self.right = [0; Self::MAX_RIGHT_LEN];
        self.left_len = 0;
        self.right_len = 0;
    }

    /// The block size used while hashing.
    ///
    /// Only the expected piece length: individual piece hashes may cover far
    /// smaller or far larger stretches of input.
    #[inline]
    #[must_use]
    pub const fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Piece characters of the block-size half.
    #[inline]
    #[must_use]
    pub fn left(&self) -> &[u8] {
        &self.left[..self.left_len]
    }

    /// Piece characters of the double-block-size half.
    #[inline]
    #[must_use]
    pub fn right(&self) -> &[u8] {
        &self.right[..self.right_len]
    }

    /// Returns `true` when both halves are empty, as for the empty input.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left_len == 0 && self.right_len == 0
    }

    /// Similarity to `other` in percent; see [`compare`](crate::compare).
    #[must_use]
    pub fn compare(&self, other: &Self) -> u32 {
        crate::compare(self, other)
    }
}

impl Default for Digest {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Equality covers the canonical content only: block size and the in-length
/// prefix of each half. Slack bytes beyond the cursors never participate.
impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.block_size == other.block_size
            && self.left() == other.left()
            && self.right() == other.right()
    }
}

impl Eq for Digest {}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Both halves only ever hold base64 alphabet bytes.
        let left = str::from_utf8(self.left()).map_err(|_| fmt::Error)?;
        let right = str::from_utf8(self.right()).map_err(|_| fmt::Error)?;
        write!(f, "{}:{left}:{right}", self.block_size)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Digest")
            .field(&format_args!("{self}"))
            .finish()
    }
}

impl FromStr for Digest {
    type Err = ParseError;

    /// Parses the canonical `blocksize:left:right` form.
    ///
    /// The parser is strict: exactly two colons, a decimal block size that
    /// fits in 32 bits, and only base64 alphabet bytes in either half, with
    /// the halves capped at 64 and 32 characters respectively.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut fields = text.split(':');
        let (Some(size), Some(left), Some(right), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseError::FieldCount {
                found: text.split(':').count(),
            });
        };

        let block_size: u32 = size.parse().map_err(|_| ParseError::BlockSize {
            text: size.to_owned(),
        })?;

        let left = checked_half(left, DigestHalf::Left)?;
        let right = checked_half(right, DigestHalf::Right)?;

        let mut digest = Self::with_block_size(block_size);
        digest.left[..left.len()].copy_from_slice(left);
        digest.left_len = left.len();
        digest.right[..right.len()].copy_from_slice(right);
        digest.right_len = right.len();
        Ok(digest)
    }
}

/// Validates one character field against the alphabet and its length cap.
fn checked_half(text: &str, half: DigestHalf) -> Result<&[u8], ParseError> {
    let bytes = text.as_bytes();
    if bytes.len() > half.max_len() {
        return Err(ParseError::TooLong {
            half,
            len: bytes.len(),
            max: half.max_len(),
        });
    }
    if let Some(&byte) = bytes.iter().find(|byte| !is_alphabet_byte(**byte)) {
        return Err(ParseError::Alphabet { half, byte });
    }
    Ok(bytes)
}

const fn is_alphabet_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'+' || byte == b'/'
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn half_strategy(max: usize) -> impl Strategy<Value = String> {
        proptest::collection::vec(0usize..64, 0..=max).prop_map(|indices| {
            indices
                .into_iter()
                .map(|i| char::from(crate::piecewise::ALPHABET[i]))
                .collect()
        })
    }

    fn digest_text_strategy() -> impl Strategy<Value = String> {
        (
            0u32..=30,
            half_strategy(Digest::MAX_LEFT_LEN),
            half_strategy(Digest::MAX_RIGHT_LEN),
        )
            .prop_map(|(k, left, right)| format!("{}:{left}:{right}", 3u32 << k))
    }

    proptest! {
        /// Property: every canonical digest text round-trips unchanged.
        #[test]
        fn parse_format_round_trip(text in digest_text_strategy()) {
            let digest: Digest = text.parse().unwrap();
            prop_assert_eq!(digest.to_string(), text);
        }

        /// Property: parsing the formatted digest reproduces the digest.
        #[test]
        fn format_parse_round_trip(text in digest_text_strategy()) {
            let digest: Digest = text.parse().unwrap();
            let again: Digest = digest.to_string().parse().unwrap();
            prop_assert_eq!(digest, again);
        }
    }
}
