#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `spamsum` computes and compares context-triggered piecewise hashes
//! (CTPH) compatible with Andrew Tridgell's spamsum and the `ssdeep` tool.
//! The hash partitions its input wherever a rolling hash satisfies a
//! block-size-dependent trigger, folds each piece into one base64
//! character, and renders the result as `blocksize:left:right`. Hash output
//! is byte-identical to the reference tool's; two hashes can then be
//! compared for a similarity score between 0 and 100.
//!
//! Fuzzy hashes are a triage tool: unlike a cryptographic digest, a small
//! edit to the input perturbs only a few characters of the output, so
//! near-duplicate inputs score high against each other. Nothing here
//! resists an adversary deliberately engineering collisions.
//!
//! # Design
//!
//! - [`hash_bytes`] and [`hash_read_seeker`] hash a whole input, searching
//!   for the smallest block size that fills the digest well; the latter
//!   rewinds its source once per search pass.
//! - [`StreamHasher`] hashes incrementally at a caller-chosen fixed block
//!   size, implements the [`digest`] crate's streaming traits and
//!   [`std::io::Write`], and can render its state at any point.
//! - [`Digest`] is the parsed form: it round-trips through the canonical
//!   text via [`std::fmt::Display`] and [`std::str::FromStr`].
//! - [`compare`] scores two digests whose block sizes are equal or in a
//!   2:1 ratio.
//!
//! # Invariants
//!
//! - A digest's left half holds at most 64 characters and its right half
//!   at most 32, drawn from the base64 alphabet with no padding.
//! - Adaptive hashing selects block sizes of the form `3 · 2^k` only.
//! - Streaming writes never fail, and chunk boundaries never influence the
//!   digest.
//!
//! # Errors
//!
//! [`ParseError`] reports malformed digest text, naming the field at
//! fault. [`hash_read_seeker`] propagates [`std::io::Error`] from its
//! source verbatim. Comparing never fails; incomparable block sizes score
//! zero.
//!
//! # Examples
//!
//! Hash two related inputs and compare the digests:
//!
//! ```
//! let base: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(37) >> 3) as u8).collect();
//! let mut edited = base.clone();
//! edited[1000] ^= 0xff;
//!
//! let x = spamsum::hash_bytes(&base);
//! let y = spamsum::hash_bytes(&edited);
//! assert_eq!(x.block_size(), 96);
//! assert_eq!(spamsum::compare(&x, &y), 99);
//! ```
//!
//! Stream input that arrives in chunks:
//!
//! ```
//! use spamsum::StreamHasher;
//!
//! let mut hasher = StreamHasher::new(3);
//! for chunk in [&b"fed in "[..], &b"pieces"[..]] {
//!     hasher.write(chunk);
//! }
//! let digest = hasher.digest();
//! assert_eq!(digest.to_string(), hasher.to_string());
//! ```

mod compare;
mod hash;
mod piecewise;
mod rolling;
mod stream;

pub use compare::compare;
pub use hash::{hash_bytes, hash_read_seeker};
pub use piecewise::{Digest, DigestHalf, ParseError};
pub use stream::StreamHasher;
