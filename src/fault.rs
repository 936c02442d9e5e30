//! Fault state management for PulseRelay.
//!
//! Two kinds of fault:
//!
//! - **Fatal** (`PeripheralInit`, `SensorInit`, `Config`): raised during bring-up. The
//!   main loop never starts; the status LED blinks instead.
//! - **Non-fatal** (`TransportWrite`): recorded and counted, the pipeline
//!   keeps running. Every new edge or line is processed independently.
//!
//! Debounce rejections, malformed command lines and edge buffer overruns are
//! not faults.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

/// Fault codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault (normal operation).
    None = 0,

    /// GPIO, ISR service or UART could not be initialized.
    PeripheralInit = 1,

    /// Motion sensor did not respond at startup.
    SensorInit = 2,

    /// A write to the host channel failed.
    /// Data holds the number of failed writes so far.
    TransportWrite = 3,

    /// Board configuration failed validation.
    Config = 4,
}

impl FaultCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => FaultCode::None,
            1 => FaultCode::PeripheralInit,
            2 => FaultCode::SensorInit,
            3 => FaultCode::TransportWrite,
            4 => FaultCode::Config,
            _ => FaultCode::None,
        }
    }

    /// Fatal faults halt the device at startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FaultCode::PeripheralInit | FaultCode::SensorInit | FaultCode::Config
        )
    }

    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultCode::None => "none",
            FaultCode::PeripheralInit => "peripheral init",
            FaultCode::SensorInit => "sensor init",
            FaultCode::TransportWrite => "transport write",
            FaultCode::Config => "config",
        }
    }
}

/// Thread-safe fault state.
///
/// Shared between bring-up code, the pipeline, and the main loop.
///
/// # Usage
///
/// ```ignore
/// static FAULT: FaultState = FaultState::new();
///
/// // In the pipeline:
/// if host.write(&frame).is_err() {
///     FAULT.set(FaultCode::TransportWrite, errors);
/// }
///
/// // At startup:
/// if FAULT.is_active() && FAULT.code().is_fatal() {
///     blink_forever();
/// }
/// ```
pub struct FaultState {
    /// True if fault is active.
    active: AtomicBool,

    /// Fault code (reason for fault).
    code: AtomicU8,

    /// Additional data (e.g., error count, ESP-IDF error code).
    data: AtomicU32,

    /// Total fault count since boot (never cleared).
    count: AtomicU32,
}

impl FaultState {
    /// Create new fault state (no fault).
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            code: AtomicU8::new(0),
            data: AtomicU32::new(0),
            count: AtomicU32::new(0),
        }
    }

    /// Set fault state.
    ///
    /// This atomically sets the fault as active with the given code and data.
    /// Increments the fault counter.
    #[inline]
    pub fn set(&self, code: FaultCode, data: u32) {
        self.code.store(code as u8, Ordering::Release);
        self.data.store(data, Ordering::Release);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);
    }

    /// Check if fault is currently active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Get fault code (only meaningful if `is_active()` is true).
    #[inline]
    pub fn code(&self) -> FaultCode {
        FaultCode::from_u8(self.code.load(Ordering::Acquire))
    }

    /// Get fault data (meaning depends on fault code).
    #[inline]
    pub fn data(&self) -> u32 {
        self.data.load(Ordering::Acquire)
    }

    /// Get total fault count since boot.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}
