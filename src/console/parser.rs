//! Line parsing and payload validation
//!
//! A payload line is exactly six comma-separated signed integers:
//!
//! ```text
//! -12,0,345,7,-8,9
//! ```
//!
//! Each field is `-?[0-9]+` and must fit an `i32`. No whitespace, no `+`.

use super::ProtocolError;

/// Number of fields in a payload line.
pub const PAYLOAD_FIELDS: usize = 6;

/// A validated payload line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload {
    pub values: [i32; PAYLOAD_FIELDS],
}

/// Remove one trailing carriage return.
pub fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Trim a command line (surrounding whitespace, CR included).
pub fn trim_command(line: &str) -> &str {
    line.trim()
}

/// Validate one received line against the payload grammar.
///
/// `line` excludes the newline. One trailing `\r` is ignored; a CR anywhere
/// else is an invalid character.
pub fn validate_payload(line: &str) -> Result<Payload, ProtocolError> {
    let line = strip_cr(line);

    if line.split(',').count() != PAYLOAD_FIELDS {
        return Err(ProtocolError::FieldCount);
    }

    let mut values = [0i32; PAYLOAD_FIELDS];
    for (slot, field) in values.iter_mut().zip(line.split(',')) {
        *slot = parse_field(field)?;
    }

    Ok(Payload { values })
}

fn parse_field(field: &str) -> Result<i32, ProtocolError> {
    if field.is_empty() {
        return Err(ProtocolError::EmptyField);
    }

    let digits = field.strip_prefix('-').unwrap_or(field);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProtocolError::InvalidCharacter);
    }

    field.parse::<i32>().map_err(|_| ProtocolError::OutOfRange)
}
