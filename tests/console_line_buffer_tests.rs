//! Line buffer tests

use pulse_relay::console::line_buffer::{LineBuffer, LINE_SIZE};
use pulse_relay::console::ProtocolError;

#[test]
fn test_line_buffer_push() {
    let mut buf = LineBuffer::new();

    for &c in b"info" {
        buf.push(c).unwrap();
    }

    assert_eq!(buf.as_str(), Ok("info"));
    assert_eq!(buf.len(), 4);
}

#[test]
fn test_line_buffer_clear() {
    let mut buf = LineBuffer::new();
    buf.push(b'x').unwrap();
    buf.clear();

    assert!(buf.is_empty());
    assert_eq!(buf.as_str(), Ok(""));
}

#[test]
fn test_line_buffer_overflow() {
    let mut buf = LineBuffer::new();

    for _ in 0..LINE_SIZE {
        buf.push(b'a').unwrap();
    }
    assert!(buf.is_full());

    assert_eq!(buf.push(b'b'), Err(ProtocolError::LineTooLong));
    assert_eq!(buf.len(), LINE_SIZE); // Contents kept
    assert!(buf.as_bytes().iter().all(|&b| b == b'a'));
}

#[test]
fn test_line_buffer_invalid_utf8() {
    let mut buf = LineBuffer::new();
    buf.push(0xFF).unwrap();

    assert_eq!(buf.as_str(), Err(ProtocolError::InvalidUtf8));
    assert_eq!(buf.as_bytes(), &[0xFF]);
}
