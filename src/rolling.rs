//! Rolling trigger hash over a fixed seven-byte window.
//!
//! spamsum cuts its input into pieces wherever this hash satisfies a
//! block-size-dependent trigger condition. The hash combines three weak
//! 32-bit accumulators: a plain byte sum over the window, a weighted sum
//! that can be maintained incrementally, and a shift-xor mix of the whole
//! input so far. None of them is a quality hash on its own; their sum is
//! merely uniform enough that the trigger fires with probability roughly
//! `1 / block_size` per byte.
//!
//! Unlike the piece accumulators, the rolling state never resets between
//! pieces. It is one continuous state over the whole input.

/// Number of bytes covered by the rolling window.
pub(crate) const WINDOW_SIZE: usize = 7;

/// Rolling hash driving the piecewise trigger decisions.
///
/// After each [`roll`](Self::roll) the state satisfies (all mod 2^32):
///
/// - `rolling` is the sum of the last (at most) seven input bytes;
/// - `h2` follows the recurrence `h2 ← h2 - rolling_prev + 7·b`;
/// - `shift` follows `shift ← (shift << 5) XOR b`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct RollingHash {
    window: [u8; WINDOW_SIZE],
    rolling: u32,
    h2: u32,
    shift: u32,
    position: u32,
}

impl RollingHash {
    /// Creates a rolling hash with zeroed state.
    pub(crate) const fn new() -> Self {
        Self {
            window: [0; WINDOW_SIZE],
            rolling: 0,
            h2: 0,
            shift: 0,
            position: 0,
        }
    }

    /// Pushes one byte through the window and returns the new trigger value.
    #[inline]
    pub(crate) fn roll(&mut self, byte: u8) -> u32 {
        let incoming = u32::from(byte);

        // h2 consumes the window sum *before* this byte enters it.
        self.h2 = self
            .h2
            .wrapping_sub(self.rolling)
            .wrapping_add(WINDOW_SIZE as u32 * incoming);

        let slot = (self.position % WINDOW_SIZE as u32) as usize;
        self.rolling = self
            .rolling
            .wrapping_add(incoming)
            .wrapping_sub(u32::from(self.window[slot]));
        self.window[slot] = byte;
        self.position = self.position.wrapping_add(1);

        self.shift = (self.shift << 5) ^ incoming;

        self.value()
    }

    /// Current trigger value, the wrapping sum of all three accumulators.
    #[inline]
    #[must_use]
    pub(crate) const fn value(&self) -> u32 {
        self.rolling.wrapping_add(self.h2).wrapping_add(self.shift)
    }

    /// Resets the window and all accumulators to zero.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}
