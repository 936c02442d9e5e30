//! Motion sensor interface.
//!
//! Register setup and bus access belong to the sensor driver; the pipeline
//! only asks for one sample per telemetry record.

use crate::framer::MotionSample;

/// Motion sensor driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionError {
    /// Bus communication error
    Bus,
    /// Chip not responding or wrong ID
    ChipNotFound,
    /// No fresh sample available
    NotReady,
}

impl core::fmt::Display for MotionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus => f.write_str("motion sensor bus error"),
            Self::ChipNotFound => f.write_str("motion sensor not found"),
            Self::NotReady => f.write_str("motion sample not ready"),
        }
    }
}

/// Source of accelerometer and gyroscope readings.
pub trait MotionSource {
    /// Probe the sensor. Failure at startup is fatal (`FaultCode::SensorInit`).
    fn init(&mut self) -> Result<(), MotionError> {
        Ok(())
    }

    /// Latest reading.
    fn sample(&mut self) -> Result<MotionSample, MotionError>;
}

/// Board without an IMU: every axis reads zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMotion;

impl MotionSource for NoMotion {
    fn sample(&mut self) -> Result<MotionSample, MotionError> {
        Ok(MotionSample::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_motion_reads_zero() {
        let mut source = NoMotion;
        assert_eq!(source.init(), Ok(()));
        assert_eq!(source.sample(), Ok(MotionSample::ZERO));
    }
}
