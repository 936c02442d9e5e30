//! Module: config
//!
//! Purpose: Pipeline configuration for PulseRelay.
//!
//! Architecture:
//! - One `PipelineConfig` value, built at startup and owned by the pipeline
//! - Board presets selected by cargo feature (`geiger`, `hall`)
//! - No runtime re-initialization: components copy what they need
//!
//! Safety: Safe. Plain `Copy` data.

use crate::frequency::{DEFAULT_CHANGE_THRESHOLD_HZ, DEFAULT_STABLE_TIMEOUT};
use crate::logging::LogLevel;
use crate::timing::{EdgeDirection, Interval};

/// Full pipeline configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Minimum time between two genuine edges.
    pub dead_time: Interval,
    /// Frequency change (Hz) that counts as significant.
    pub change_threshold_hz: f32,
    /// Frequency is forced to 0 after this long without a significant change.
    pub stable_timeout: Interval,
    /// Measurement state at boot.
    pub start_running: bool,
    /// Edge that triggers the capture interrupt.
    pub edge: EdgeDirection,
    /// Emit one binary frame per accepted interval on the host channel.
    pub binary_frames: bool,
    /// Emit periodic text telemetry records on the host channel.
    pub telemetry: bool,
    /// Telemetry record period.
    pub telemetry_period_ms: u32,
    /// Validate peer lines against the six-integer grammar instead of
    /// relaying them verbatim.
    pub validate_peer_lines: bool,
    /// Forward `s0`/`s1`/`info` to the peer as well as acting on them.
    pub forward_control_tokens: bool,
    /// Identifier returned by `info`.
    pub device_id: &'static str,
    /// Most verbose level kept in the log stream.
    pub log_level: LogLevel,
}

impl PipelineConfig {
    /// Geiger-Müller counter board: rising-edge decay pulses, binary frames,
    /// the counter's own serial port relayed as peer.
    pub const GEIGER_COUNTER: Self = Self {
        dead_time: Interval::from_micros(10),
        change_threshold_hz: DEFAULT_CHANGE_THRESHOLD_HZ,
        stable_timeout: DEFAULT_STABLE_TIMEOUT,
        start_running: false,
        edge: EdgeDirection::Rising,
        binary_frames: true,
        telemetry: false,
        telemetry_period_ms: 10,
        validate_peer_lines: false,
        forward_control_tokens: true,
        device_id: "TEST",
        log_level: LogLevel::Info,
    };

    /// Hall sensor rotor board: falling edges, text telemetry at 100 Hz.
    pub const HALL_SENSOR: Self = Self {
        dead_time: Interval::from_micros(1_500),
        change_threshold_hz: DEFAULT_CHANGE_THRESHOLD_HZ,
        stable_timeout: DEFAULT_STABLE_TIMEOUT,
        start_running: true,
        edge: EdgeDirection::Falling,
        binary_frames: false,
        telemetry: true,
        telemetry_period_ms: 10,
        validate_peer_lines: false,
        forward_control_tokens: true,
        device_id: "E76347",
        log_level: LogLevel::Info,
    };

    /// Check invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dead_time.is_zero() {
            return Err(ConfigError::ZeroDeadTime);
        }
        if self.change_threshold_hz.is_nan() || self.change_threshold_hz < 0.0 {
            return Err(ConfigError::BadThreshold);
        }
        if self.stable_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.telemetry && self.telemetry_period_ms == 0 {
            return Err(ConfigError::ZeroTelemetryPeriod);
        }
        if self.device_id.is_empty() {
            return Err(ConfigError::EmptyDeviceId);
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        BOARD_CONFIG
    }
}

/// Preset for the board this firmware is built for.
#[cfg(feature = "hall")]
pub const BOARD_CONFIG: PipelineConfig = PipelineConfig::HALL_SENSOR;

/// Preset for the board this firmware is built for.
#[cfg(not(feature = "hall"))]
pub const BOARD_CONFIG: PipelineConfig = PipelineConfig::GEIGER_COUNTER;

/// Configuration rejected by [`PipelineConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Dead time of zero lets zero intervals through
    ZeroDeadTime,
    /// Threshold negative or NaN
    BadThreshold,
    /// Stable timeout of zero zeroes every reading
    ZeroTimeout,
    /// Telemetry enabled with no period
    ZeroTelemetryPeriod,
    /// `info` would answer nothing
    EmptyDeviceId,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::ZeroDeadTime => "dead time must be > 0",
            Self::BadThreshold => "change threshold must be >= 0",
            Self::ZeroTimeout => "stable timeout must be > 0",
            Self::ZeroTelemetryPeriod => "telemetry period must be > 0",
            Self::EmptyDeviceId => "device id is empty",
        };
        f.write_str(msg)
    }
}
