//! Module: timing
//!
//! Purpose: Timestamp and interval types for edge timing. A timestamp is a
//! free-running microsecond counter that wraps at 32 bits (~71.6 minutes).
//!
//! Architecture:
//! - All interval math is unsigned wrapping subtraction, so a counter wrap
//!   between two edges still yields the correct positive delta
//! - `Interval::ZERO` is the "no new interval" sentinel
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

/// Microseconds per second, used for period to frequency conversion.
pub const MICROS_PER_SECOND: u32 = 1_000_000;

/// Point in time on the 32-bit microsecond counter.
///
/// Monotonic except for wraparound at `u32::MAX`. Never compare two
/// timestamps with `<`; use [`Timestamp::elapsed_since`].
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Counter value at boot.
    pub const ZERO: Self = Self(0);

    /// Create from a raw counter value in microseconds.
    pub const fn from_micros(us: u32) -> Self {
        Self(us)
    }

    /// Truncate a 64-bit system timer reading to the counter width.
    ///
    /// `esp_timer_get_time()` returns i64 microseconds since boot; keeping
    /// the low 32 bits gives the same wrap behaviour as an MCU `micros()`.
    pub const fn from_micros_i64(us: i64) -> Self {
        Self(us as u32)
    }

    /// Raw counter value.
    pub const fn as_micros(&self) -> u32 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, wraparound-safe.
    pub const fn elapsed_since(&self, earlier: Timestamp) -> Interval {
        Interval(self.0.wrapping_sub(earlier.0))
    }
}

/// Distance between two timestamps in microseconds.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(u32);

impl Interval {
    /// No interval (sentinel).
    pub const ZERO: Self = Self(0);

    /// Create from microseconds.
    pub const fn from_micros(us: u32) -> Self {
        Self(us)
    }

    /// Create from milliseconds (saturating).
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms.saturating_mul(1000))
    }

    /// Microseconds.
    pub const fn as_micros(&self) -> u32 {
        self.0
    }

    /// Check for the zero sentinel.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Instantaneous rate for one period of this length.
    ///
    /// Returns `None` for a zero interval.
    pub fn as_hz(&self) -> Option<f32> {
        if self.0 == 0 {
            None
        } else {
            Some(MICROS_PER_SECOND as f32 / self.0 as f32)
        }
    }
}

/// Signal transition that triggers the capture interrupt.
///
/// Board-specific: the Geiger counter output pulses high, the Hall sensor
/// pulls low.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeDirection {
    Rising,
    Falling,
}

impl EdgeDirection {
    /// Short name for logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EdgeDirection::Rising => "rising",
            EdgeDirection::Falling => "falling",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_simple() {
        let a = Timestamp::from_micros(1_000);
        let b = Timestamp::from_micros(3_500);
        assert_eq!(b.elapsed_since(a), Interval::from_micros(2_500));
    }

    #[test]
    fn test_elapsed_across_wrap() {
        let before = Timestamp::from_micros(u32::MAX - 99);
        let after = Timestamp::from_micros(150);
        assert_eq!(after.elapsed_since(before), Interval::from_micros(250));
    }

    #[test]
    fn test_from_i64_truncates() {
        let t = Timestamp::from_micros_i64((1i64 << 32) + 42);
        assert_eq!(t.as_micros(), 42);
    }

    #[test]
    fn test_as_hz() {
        assert_eq!(Interval::from_micros(1_000).as_hz(), Some(1_000.0));
        assert_eq!(Interval::from_micros(3).as_hz(), Some(1_000_000.0f32 / 3.0));
        assert_eq!(Interval::ZERO.as_hz(), None);
    }

    #[test]
    fn test_from_millis_saturates() {
        assert_eq!(Interval::from_millis(2_000).as_micros(), 2_000_000);
        assert_eq!(Interval::from_millis(u32::MAX).as_micros(), u32::MAX);
    }
}
