//! Peer-side line receiver
//!
//! Lines from the downstream device are either relayed to the host verbatim
//! or checked against the payload grammar first.

use super::console::INVALID_REPLY;
use super::parser::{strip_cr, validate_payload};
use super::{LineBuffer, ProtocolError};
use crate::transport::{Transport, TransportError, LINE_END};

/// Prefix for lines that pass validation.
pub const VALID_PREFIX: &str = "Message is valid: ";

/// What happened to a completed peer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerLine {
    /// Relayed verbatim
    Relayed,
    /// Passed validation and was echoed with [`VALID_PREFIX`]
    Valid,
    /// Answered with `invalid`
    Invalid(ProtocolError),
}

/// Byte accumulator for the peer channel.
pub struct PeerReceiver {
    line: LineBuffer,
    validate: bool,
    /// Dropping the tail of an overlong line until its newline
    discarding: bool,
}

impl PeerReceiver {
    /// `validate` selects validation mode instead of plain relay.
    pub const fn new(validate: bool) -> Self {
        Self {
            line: LineBuffer::new(),
            validate,
            discarding: false,
        }
    }

    /// Process one byte from the peer, writing any reply to `host`.
    ///
    /// After an overflow the rest of the line, up to its newline, is ignored.
    pub fn process_byte(
        &mut self,
        byte: u8,
        host: &mut dyn Transport,
    ) -> Option<Result<PeerLine, ProtocolError>> {
        if self.discarding {
            if byte == b'\n' {
                self.discarding = false;
            }
            return None;
        }

        if byte == b'\n' {
            let result = self.complete(host);
            self.line.clear();
            return Some(result);
        }

        match self.line.push(byte) {
            Ok(()) => None,
            Err(err) => {
                self.line.clear();
                self.discarding = true;
                Some(
                    host.write_line(INVALID_REPLY)
                        .map(|()| PeerLine::Invalid(err))
                        .map_err(ProtocolError::from),
                )
            }
        }
    }

    /// Drain every byte `peer` has ready.
    ///
    /// Returns the number of completed lines, or the first host write error.
    /// Input keeps being consumed after a failed write.
    pub fn poll(
        &mut self,
        peer: &mut dyn Transport,
        host: &mut dyn Transport,
    ) -> Result<u32, TransportError> {
        let mut lines = 0;
        let mut failed = None;
        while peer.available() > 0 {
            let Some(byte) = peer.read_byte() else {
                break;
            };
            match self.process_byte(byte, host) {
                Some(Ok(_)) => lines += 1,
                Some(Err(ProtocolError::Transport(err))) => {
                    failed.get_or_insert(err);
                }
                // complete() reports grammar errors as PeerLine::Invalid
                Some(Err(_)) | None => {}
            }
        }
        match failed {
            Some(err) => Err(err),
            None => Ok(lines),
        }
    }

    fn complete(&self, host: &mut dyn Transport) -> Result<PeerLine, ProtocolError> {
        if !self.validate {
            let bytes = self.line.as_bytes();
            let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
            host.write(bytes)?;
            host.write(LINE_END)?;
            return Ok(PeerLine::Relayed);
        }

        let checked = self
            .line
            .as_str()
            .and_then(|line| validate_payload(line).map(|_| strip_cr(line)));

        match checked {
            Ok(line) => {
                host.write(VALID_PREFIX.as_bytes())?;
                host.write_line(line)?;
                Ok(PeerLine::Valid)
            }
            Err(err) => {
                host.write_line(INVALID_REPLY)?;
                Ok(PeerLine::Invalid(err))
            }
        }
    }
}
