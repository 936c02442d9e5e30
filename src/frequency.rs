//! Frequency derivation with stale-signal detection.
//!
//! Every accepted interval gives an instantaneous rate `1_000_000 / interval`.
//! A rate that has not moved by more than `change_threshold` for longer than
//! `stable_timeout` is treated as "no signal" and forced to zero. A magnet
//! parked in front of a Hall sensor, or a stalled rotor, must read 0 Hz, not
//! the last speed seen.
//!
//! The timeout is evaluated by [`FrequencyTracker::tick`], which the main loop
//! calls every iteration whether or not an edge arrived.

use crate::timing::{Interval, Timestamp};

/// Default significant-change threshold (Hz).
pub const DEFAULT_CHANGE_THRESHOLD_HZ: f32 = 0.05;

/// Default stable timeout: 2 s.
pub const DEFAULT_STABLE_TIMEOUT: Interval = Interval::from_millis(2_000);

/// Frequency state.
#[derive(Clone, Debug)]
pub struct FrequencyTracker {
    current_hz: f32,
    last_hz: f32,
    last_significant_change: Timestamp,
    change_threshold_hz: f32,
    stable_timeout: Interval,
}

impl FrequencyTracker {
    /// Create a tracker at 0 Hz.
    pub const fn new(change_threshold_hz: f32, stable_timeout: Interval) -> Self {
        Self {
            current_hz: 0.0,
            last_hz: 0.0,
            last_significant_change: Timestamp::ZERO,
            change_threshold_hz,
            stable_timeout,
        }
    }

    /// Feed an accepted interval observed at `now`.
    ///
    /// Returns the instantaneous frequency, or `None` for a zero interval
    /// (which is ignored).
    pub fn on_interval(&mut self, now: Timestamp, interval: Interval) -> Option<f32> {
        let instant_hz = interval.as_hz()?;

        if abs_diff(instant_hz, self.last_hz) > self.change_threshold_hz {
            self.last_hz = instant_hz;
            self.last_significant_change = now;
        }

        self.current_hz = instant_hz;
        Some(instant_hz)
    }

    /// Apply the stale rule at `now`.
    ///
    /// Returns `true` if the frequency was forced to zero by this call.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        if self.current_hz <= 0.0 {
            return false;
        }

        if now.elapsed_since(self.last_significant_change) > self.stable_timeout {
            self.current_hz = 0.0;
            self.last_hz = 0.0;
            return true;
        }

        false
    }

    /// Current frequency (Hz), 0 when stale or no signal.
    pub fn current(&self) -> f32 {
        self.current_hz
    }

    /// Reference frequency for change detection (Hz).
    pub fn last_significant(&self) -> f32 {
        self.last_hz
    }

    /// When the last significant change happened.
    pub fn last_significant_change(&self) -> Timestamp {
        self.last_significant_change
    }
}

impl Default for FrequencyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGE_THRESHOLD_HZ, DEFAULT_STABLE_TIMEOUT)
    }
}

// f32::abs lives in std until recent toolchains
#[inline]
fn abs_diff(a: f32, b: f32) -> f32 {
    if a >= b {
        a - b
    } else {
        b - a
    }
}
