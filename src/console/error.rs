//! Protocol error types

use crate::transport::TransportError;

/// Command protocol error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// E01: Line exceeded the buffer before its newline
    LineTooLong,
    /// E02: Line is not valid UTF-8
    InvalidUtf8,
    /// E03: Payload does not have exactly six fields
    FieldCount,
    /// E04: Empty payload field
    EmptyField,
    /// E05: Character other than a digit or leading minus
    InvalidCharacter,
    /// E06: Field does not fit a 32-bit signed integer
    OutOfRange,
    /// E07: Reply or relay could not be written
    Transport(TransportError),
}

impl ProtocolError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::LineTooLong => "E01",
            Self::InvalidUtf8 => "E02",
            Self::FieldCount => "E03",
            Self::EmptyField => "E04",
            Self::InvalidCharacter => "E05",
            Self::OutOfRange => "E06",
            Self::Transport(_) => "E07",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::LineTooLong => "line too long",
            Self::InvalidUtf8 => "invalid utf-8",
            Self::FieldCount => "expected 6 fields",
            Self::EmptyField => "empty field",
            Self::InvalidCharacter => "invalid character",
            Self::OutOfRange => "out of range",
            Self::Transport(TransportError::Write) => "transport write failed",
            Self::Transport(TransportError::Read) => "transport read failed",
        }
    }

    /// Grammar and framing errors are answered with `invalid`;
    /// transport errors are not.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }
}

impl From<TransportError> for ProtocolError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
