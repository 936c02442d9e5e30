//! Shared test helpers

#![allow(dead_code)]

use std::collections::VecDeque;

use pulse_relay::transport::{Transport, TransportError};

/// In-memory transport: queued input, captured output.
#[derive(Default)]
pub struct MockTransport {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
    /// Fail every write while set
    pub fail_writes: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes as if received.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Output as text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Output split into lines (CRLF removed).
    pub fn lines(&self) -> Vec<String> {
        self.text()
            .split("\r\n")
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect()
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl Transport for MockTransport {
    fn available(&mut self) -> usize {
        self.input.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if self.fail_writes {
            return Err(TransportError::Write);
        }
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}
