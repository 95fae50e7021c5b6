//! Similarity scoring between two digests.
//!
//! Digests are only comparable when their block sizes are equal or differ
//! by exactly a factor of two; the halves hashed at the shared block size
//! are then scored against each other. A score is a weighted edit distance
//! over the piece characters, normalised to a percentage, after two
//! preprocessing steps: a 7-gram screen that discards pairs with no seven
//! consecutive characters in common, and a canonicalisation that collapses
//! character runs so that long stretches of repeated input cannot dominate
//! the distance.
//!
//! The scoring pipeline follows the reference library, which is documented
//! as diverging from original ssdeep in score magnitude. Hash *output* is
//! bit-compatible; scores are pinned to this algorithm.

use crate::piecewise::Digest;

const INSERT_COST: u32 = 1;
const DELETE_COST: u32 = 1;
const SUBSTITUTE_COST: u32 = 3;

/// Run length the common-substring screen requires.
const COMMON_LEN: usize = 7;

/// Longest run of identical characters surviving canonicalisation.
const MAX_RUN: usize = 3;

/// Compares two digests, returning a similarity in percent.
///
/// Returns 0 when the block sizes are neither equal nor in a 2:1 ratio;
/// such digests observed incompatible piece boundaries and carry no usable
/// overlap. With equal block sizes both half pairs are scored and the
/// better result wins; with a 2:1 ratio the finer digest's right half is
/// scored against the coarser digest's left half.
///
/// # Examples
///
/// ```
/// use spamsum::Digest;
///
/// let x: Digest = "12582912:UVxeXup8VuH8rD//pcrHBrlG5FWgYJ70A:O4XuptH8D//pcrHmgfL"
///     .parse()
///     .unwrap();
/// let y: Digest = "12582912:kVxeXup8VuH8rD//4crHBrlGXm5WgYJ70A:e4XuptH8D//4crHMmUfL"
///     .parse()
///     .unwrap();
/// assert_eq!(spamsum::compare(&x, &y), 91);
/// ```
#[must_use]
pub fn compare(x: &Digest, y: &Digest) -> u32 {
    // Widen before doubling: the ratio test must not wrap at `3 · 2^30`.
    let x_size = u64::from(x.block_size());
    let y_size = u64::from(y.block_size());

    if x_size == y_size {
        score(x.left(), y.left(), x.block_size()).max(score(x.right(), y.right(), y.block_size()))
    } else if x_size == 2 * y_size {
        score(x.left(), y.right(), x.block_size())
    } else if y_size == 2 * x_size {
        score(x.right(), y.left(), y.block_size())
    } else {
        0
    }
}

/// Scores one pair of half strings hashed at the same block size.
fn score(a: &[u8], b: &[u8], block_size: u32) -> u32 {
    if !has_common_substring(a, b) {
        return 0;
    }

    let a = eliminate_repetition(a);
    let b = eliminate_repetition(b);

    // The screen admitted seven common characters, so neither canonical
    // string is empty and `d ≤ |a| + |b|` bounds the scaled distance by 64.
    let total = (a.len() + b.len()) as u64;
    let mut score = u64::from(edit_distance(&a, &b));
    score = score * Digest::MAX_LEFT_LEN as u64 / total;
    score = score * 100 / Digest::MAX_LEFT_LEN as u64;
    score = 100 - score;

    // An upper bound proportional to how much signal the pair can carry;
    // for small block sizes this caps well below 100.
    let cap = u64::from(block_size / Digest::MIN_BLOCK_SIZE) * a.len().min(b.len()) as u64;
    score.min(cap) as u32
}

/// Collapses every run of four or more identical bytes to exactly three.
///
/// A long run in the input produces a long run of identical piece
/// characters; without this step such runs would swamp the edit distance
/// with matches carrying no structure.
pub(crate) fn eliminate_repetition(text: &[u8]) -> Vec<u8> {
    if text.len() <= MAX_RUN {
        return text.to_vec();
    }

    let mut out = Vec::with_capacity(text.len());
    out.extend_from_slice(&text[..MAX_RUN]);
    for i in MAX_RUN..text.len() {
        let byte = text[i];
        if text[i - 3] != byte || text[i - 2] != byte || text[i - 1] != byte {
            out.push(byte);
        }
    }
    out
}

/// Reports whether the inputs share any run of seven consecutive bytes.
///
/// Slides one string across the other and counts consecutive matches at
/// each alignment; quadratic, but the inputs are at most 64 bytes.
pub(crate) fn has_common_substring(a: &[u8], b: &[u8]) -> bool {
    if a.len() < COMMON_LEN || b.len() < COMMON_LEN {
        return false;
    }

    let mut shift = a.len() as isize - COMMON_LEN as isize;
    while shift >= COMMON_LEN as isize - b.len() as isize {
        let mut i = shift.max(0) as usize;
        let mut j = (-shift).max(0) as usize;
        let mut run = 0;
        while i < a.len() && j < b.len() {
            if a[i] != b[j] {
                run = 0;
            } else if run == COMMON_LEN - 1 {
                return true;
            } else {
                run += 1;
            }
            i += 1;
            j += 1;
        }
        shift -= 1;
    }
    false
}

/// Weighted Levenshtein distance: insert and delete cost 1, substitution
/// costs 3, no transposition.
///
/// Bottom-up over a full `(|a|+1) × (|b|+1)` table, so every cell is
/// written exactly once before it is read and no "unfilled" sentinel is
/// needed.
pub(crate) fn edit_distance(a: &[u8], b: &[u8]) -> u32 {
    let columns = b.len() + 1;
    let mut table = vec![0u32; (a.len() + 1) * columns];

    for (j, cell) in table.iter_mut().take(columns).enumerate() {
        *cell = j as u32 * INSERT_COST;
    }
    for i in 1..=a.len() {
        table[i * columns] = i as u32 * DELETE_COST;
        for j in 1..=b.len() {
            let substitute = if a[i - 1] == b[j - 1] {
                0
            } else {
                SUBSTITUTE_COST
            };
            table[i * columns + j] = (table[(i - 1) * columns + j] + DELETE_COST)
                .min(table[i * columns + j - 1] + INSERT_COST)
                .min(table[(i - 1) * columns + j - 1] + substitute);
        }
    }
    table[a.len() * columns + b.len()]
}
