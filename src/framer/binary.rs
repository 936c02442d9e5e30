//! Binary frame codec.
//!
//! Frame layout (6 bytes):
//!
//! ```text
//! [0xAA][b0][b1][b2][b3][0x55]
//!        └─ u32 little-endian ─┘
//! ```
//!
//! Payload bytes are not escaped. A payload byte may equal either sentinel,
//! so receivers must read exactly [`FRAME_LEN`] bytes per frame and never scan
//! for [`END_BYTE`] as a delimiter.

use super::FrameError;

/// Frame start sentinel.
pub const START_BYTE: u8 = 0xAA;

/// Frame end sentinel.
pub const END_BYTE: u8 = 0x55;

/// Total frame length in bytes.
pub const FRAME_LEN: usize = 6;

/// Encode one value.
#[inline]
pub const fn encode_frame(value: u32) -> [u8; FRAME_LEN] {
    let b = value.to_le_bytes();
    [START_BYTE, b[0], b[1], b[2], b[3], END_BYTE]
}

/// Decode one frame, checking both sentinels.
#[inline]
pub fn decode_frame(frame: &[u8; FRAME_LEN]) -> Result<u32, FrameError> {
    if frame[0] != START_BYTE {
        return Err(FrameError::BadStart);
    }
    if frame[FRAME_LEN - 1] != END_BYTE {
        return Err(FrameError::BadEnd);
    }
    Ok(u32::from_le_bytes([frame[1], frame[2], frame[3], frame[4]]))
}

/// Receiver-side frame synchronizer.
///
/// Collects bytes into a fixed 6-byte window. A full window with valid
/// sentinels yields its value and is cleared; an invalid window drops its
/// first byte and waits for one more. A stream that starts mid-frame or
/// carries line noise resynchronizes within one frame of clean data.
pub struct FrameDecoder {
    window: [u8; FRAME_LEN],
    len: usize,
    skipped: u32,
}

impl FrameDecoder {
    /// Create empty decoder.
    pub const fn new() -> Self {
        Self {
            window: [0u8; FRAME_LEN],
            len: 0,
            skipped: 0,
        }
    }

    /// Feed one byte. Returns a value when a frame completes.
    pub fn push(&mut self, byte: u8) -> Option<u32> {
        self.window[self.len] = byte;
        self.len += 1;

        if self.len < FRAME_LEN {
            return None;
        }

        match decode_frame(&self.window) {
            Ok(value) => {
                self.len = 0;
                Some(value)
            }
            Err(_) => {
                self.window.copy_within(1.., 0);
                self.len = FRAME_LEN - 1;
                self.skipped = self.skipped.saturating_add(1);
                None
            }
        }
    }

    /// Bytes discarded while resynchronizing.
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    /// Bytes held for an incomplete frame.
    pub fn pending(&self) -> usize {
        self.len
    }

    /// Drop any partial frame.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
