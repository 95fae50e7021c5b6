use core::fmt;

use thiserror::Error;

/// Half of a digest a parse failure refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DigestHalf {
    /// The block-size half (at most 64 characters).
    Left,
    /// The double-block-size half (at most 32 characters).
    Right,
}

impl DigestHalf {
    /// Length cap of this half's character field.
    #[must_use]
    pub const fn max_len(self) -> usize {
        match self {
            Self::Left => crate::Digest::MAX_LEFT_LEN,
            Self::Right => crate::Digest::MAX_RIGHT_LEN,
        }
    }
}

impl fmt::Display for DigestHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Errors raised while parsing the textual digest form.
///
/// Each variant names the field that failed, so callers can surface the
/// offending part of the input without re-parsing it themselves.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// The text did not split into exactly `blocksize:left:right`.
    #[error("digest text must have exactly three colon-separated fields, found {found}")]
    FieldCount {
        /// Number of colon-separated fields in the rejected input.
        found: usize,
    },
    /// The block-size field was empty, non-numeric, or beyond 32 bits.
    #[error("block size {text:?} is not an unsigned 32-bit number")]
    BlockSize {
        /// The rejected block-size field.
        text: String,
    },
    /// A character field contained a byte outside the base64 alphabet.
    #[error("{half} hash field contains byte {byte:#04x}, outside the base64 alphabet")]
    Alphabet {
        /// The half holding the invalid byte.
        half: DigestHalf,
        /// The first invalid byte encountered.
        byte: u8,
    },
    /// A character field exceeded its length cap.
    #[error("{half} hash field is {len} characters long, limit {max}")]
    TooLong {
        /// The over-long half.
        half: DigestHalf,
        /// Length of the rejected field.
        len: usize,
        /// The cap that was exceeded.
        max: usize,
    },
}
