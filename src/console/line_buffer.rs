//! Line buffer for protocol input

use super::ProtocolError;

/// Maximum line length in bytes, terminator excluded.
pub const LINE_SIZE: usize = 64;

/// Line input buffer
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
        }
    }

    /// Push a byte.
    ///
    /// A full buffer rejects the byte and keeps its contents; the caller
    /// decides whether to discard the line.
    pub fn push(&mut self, c: u8) -> Result<(), ProtocolError> {
        if self.is_full() {
            return Err(ProtocolError::LineTooLong);
        }
        self.buf[self.len] = c;
        self.len += 1;
        Ok(())
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> Result<&str, ProtocolError> {
        core::str::from_utf8(&self.buf[..self.len]).map_err(|_| ProtocolError::InvalidUtf8)
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if another push would fail
    pub fn is_full(&self) -> bool {
        self.len == LINE_SIZE
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
