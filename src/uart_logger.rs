//! Log output over a dedicated TX-only channel.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32-S3 log TX ──────▶ USB-UART RX
//!                          └─▶ PC Serial Monitor
//! ```
//!
//! The log channel is never the host channel: binary frames and log text
//! must not interleave.

use crate::logging::{format_to_buffer, LogEntry, LogStream};
use crate::transport::Transport;

/// Scratch size for one formatted entry.
const FORMAT_BUF_LEN: usize = 160;

/// Format log entry to string.
///
/// Format: `[timestamp_us] LEVEL: message\r\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    format_to_buffer(
        buf,
        format_args!(
            "[{:10}] {}: {}\r\n",
            entry.timestamp.as_micros(),
            entry.level.as_str(),
            entry.message()
        ),
    )
}

/// Drain every pending entry of `stream` into `out`.
///
/// Reports and resets the dropped counter once the queue is empty.
/// Write errors are ignored: there is nowhere left to report them.
/// Returns the number of entries written.
pub fn drain_logs<const N: usize>(stream: &LogStream<N>, out: &mut dyn Transport) -> u32 {
    let mut format_buf = [0u8; FORMAT_BUF_LEN];
    let mut written = 0u32;

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut format_buf);
        let _ = out.write(&format_buf[..len]);
        written += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let len = format_to_buffer(
            &mut format_buf,
            format_args!("[WARN] Dropped log messages: {}\r\n", dropped),
        );
        let _ = out.write(&format_buf[..len]);
        stream.reset_dropped();
    }

    written
}
