//! Text telemetry record.
//!
//! Format (one line, 8 fields):
//!
//! ```text
//! uptime_ms,frequency,accel_x,accel_y,accel_z,gyro_x,gyro_y,gyro_z
//! 123456,12.5000,0.0120,-0.0310,9.8070,0.0010,0.0000,-0.0020
//! ```
//!
//! Every float field is printed with four decimals. Motion values come from
//! an external sensor driver; this module only formats.

use core::fmt;

use super::FrameError;

/// Upper bound for a formatted record, line terminator excluded.
pub const MAX_RECORD_LEN: usize = 192;

/// One motion sensor reading (m/s² and rad/s).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionSample {
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
}

impl MotionSample {
    /// All axes zero (no sensor fitted).
    pub const ZERO: Self = Self {
        accel: [0.0; 3],
        gyro: [0.0; 3],
    };
}

/// One telemetry line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TelemetryRecord {
    pub uptime_ms: u32,
    pub frequency_hz: f32,
    pub motion: MotionSample,
}

impl TelemetryRecord {
    /// Format into `buf`.
    ///
    /// Returns the number of bytes written, or `RecordTooLong` if the record
    /// does not fit. A partial record is never reported as success.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        use fmt::Write;

        let mut writer = SliceWriter { buf, pos: 0 };
        write!(writer, "{}", self).map_err(|_| FrameError::RecordTooLong)?;
        Ok(writer.pos)
    }
}

impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [ax, ay, az] = self.motion.accel;
        let [gx, gy, gz] = self.motion.gyro;
        write!(
            f,
            "{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            self.uptime_ms, self.frequency_hz, ax, ay, az, gx, gy, gz
        )
    }
}

/// Fixed-slice writer that fails instead of truncating.
struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> fmt::Write for SliceWriter<'a> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}
