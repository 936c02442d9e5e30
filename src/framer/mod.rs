//! Output encodings for measured values.
//!
//! - [`binary`]: fixed 6-byte frames for the raw serial channel
//! - [`telemetry`]: comma-separated text records for the telemetry channel

pub mod binary;
pub mod telemetry;

pub use binary::{decode_frame, encode_frame, FrameDecoder, END_BYTE, FRAME_LEN, START_BYTE};
pub use telemetry::{MotionSample, TelemetryRecord, MAX_RECORD_LEN};

/// Framing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// First byte is not [`START_BYTE`]
    BadStart,
    /// Last byte is not [`END_BYTE`]
    BadEnd,
    /// Text record does not fit the output buffer
    RecordTooLong,
}

impl FrameError {
    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::BadStart => "bad start byte",
            Self::BadEnd => "bad end byte",
            Self::RecordTooLong => "record too long",
        }
    }
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}
