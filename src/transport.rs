//! Byte transport abstraction.
//!
//! A transport is a non-blocking byte channel: callers ask how many bytes are
//! available before reading, and writes hand bytes to the driver's TX queue.
//! On the board this is a UART (see `hal::uart`); tests use an in-memory
//! implementation.

/// Transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Driver rejected or only partially accepted a write
    Write,
    /// Driver reported a receive error
    Read,
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Write => f.write_str("transport write failed"),
            Self::Read => f.write_str("transport read failed"),
        }
    }
}

/// Line terminator used on every text channel.
pub const LINE_END: &[u8] = b"\r\n";

/// Non-blocking byte channel.
pub trait Transport {
    /// Bytes ready to read without blocking.
    fn available(&mut self) -> usize;

    /// Read one byte if available. Never blocks.
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue bytes for transmission.
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Write a text line followed by [`LINE_END`].
    fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.write(line.as_bytes())?;
        self.write(LINE_END)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Capture(Vec<u8>);

    impl Transport for Capture {
        fn available(&mut self) -> usize {
            0
        }

        fn read_byte(&mut self) -> Option<u8> {
            None
        }

        fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
            self.0.extend_from_slice(bytes);
            Ok(())
        }
    }

    #[test]
    fn test_write_line_appends_crlf() {
        let mut out = Capture(Vec::new());
        out.write_line("info").unwrap();
        assert_eq!(out.0, b"info\r\n");
    }
}
