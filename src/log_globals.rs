//! Global log stream instance.
//!
//! Only the main loop produces log entries and only `uart_logger::drain_logs`
//! consumes them, so one stream is enough.

use crate::logging::LogStream;

/// Log stream for the main loop.
///
/// Single producer (main loop), single consumer (log UART drain).
pub static LOG_STREAM: LogStream = LogStream::new();
