//! Hardware Abstraction Layer for PulseRelay.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Business logic stays in core modules, HAL is just I/O.

pub mod motion;

#[cfg(target_os = "espidf")]
pub mod gpio;
#[cfg(target_os = "espidf")]
pub mod uart;

pub use motion::{MotionError, MotionSource, NoMotion};
