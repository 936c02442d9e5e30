//! Lock-free SPSC (Single Producer, Single Consumer) edge timestamp buffer.
//!
//! This is the hand-off between interrupt context and the main loop. Every
//! captured edge flows through here.
//!
//! # Architecture
//!
//! ```text
//! GPIO ISR ──────▶ IntervalBuffer ──────▶ EdgeConsumer (main loop)
//!  push()           (lock-free)            try_dequeue()
//! ```
//!
//! # Rules
//!
//! - The ISR only advances the write cursor and writes the slot under it
//! - The consumer owns its read cursor; the ISR never reads or writes it
//! - Only atomic loads/stores for synchronization, no masking on the ISR side
//! - No operation blocks; when full, the oldest unread entries are lost

use core::sync::atomic::{AtomicU32, Ordering};

use crate::timing::Timestamp;

/// Default buffer size: 128 timestamps.
/// At 1 kHz edge rate this is ~128ms of slack for a stalled main loop.
pub const EDGE_BUFFER_SIZE: usize = 128;

/// Lock-free ring buffer of raw edge timestamps.
///
/// # Memory Ordering
///
/// - Producer stores the slot with `Release`, then publishes the write cursor
///   with `Release`
/// - Consumer loads the write cursor with `Acquire`, loads the slot with
///   `Acquire`, then re-checks the write cursor
/// - If the producer lapped the slot while it was being read, the re-check
///   sees it and the value is discarded
///
/// One slot is reserved for the write that may be in flight inside the ISR,
/// so at most `N - 1` unread timestamps are retrievable.
pub struct IntervalBuffer<const N: usize = EDGE_BUFFER_SIZE> {
    /// Ring of raw timestamps (microseconds).
    slots: [AtomicU32; N],

    /// Next write index (monotonically increasing, wraps via mask).
    write_idx: AtomicU32,
}

impl<const N: usize> IntervalBuffer<N> {
    /// Mask for wrapping index to buffer size.
    const MASK: usize = N - 1;

    /// Create a new empty buffer.
    ///
    /// Fails to compile if N is not a power of 2.
    pub const fn new() -> Self {
        const { assert!(N.is_power_of_two() && N >= 2, "Buffer size must be power of 2") };

        #[allow(clippy::declare_interior_mutable_const)]
        const EMPTY_SLOT: AtomicU32 = AtomicU32::new(0);

        Self {
            slots: [EMPTY_SLOT; N],
            write_idx: AtomicU32::new(0),
        }
    }

    /// Push a timestamp (producer side, ISR-safe).
    ///
    /// # Timing
    ///
    /// Two relaxed loads/stores and two release stores. Never blocks, never
    /// allocates, never inspects the consumer.
    #[inline]
    pub fn push(&self, timestamp: Timestamp) {
        // Single producer: nobody else writes write_idx
        let idx = self.write_idx.load(Ordering::Relaxed);

        self.slots[(idx as usize) & Self::MASK].store(timestamp.as_micros(), Ordering::Release);
        self.write_idx.store(idx.wrapping_add(1), Ordering::Release);
    }

    /// Read the timestamp at the given index.
    ///
    /// Returns `None` if:
    /// - Index is at or ahead of write head (not yet written)
    /// - Index is too far behind (overwritten, or being overwritten)
    #[inline]
    pub fn read(&self, idx: u32) -> Option<Timestamp> {
        if !self.is_readable(idx) {
            return None;
        }

        let raw = self.slots[(idx as usize) & Self::MASK].load(Ordering::Acquire);

        // Producer may have lapped the slot while we were loading it
        if !self.is_readable(idx) {
            return None;
        }

        Some(Timestamp::from_micros(raw))
    }

    #[inline]
    fn is_readable(&self, idx: u32) -> bool {
        let behind = self.lag(idx);
        behind != 0 && behind < N as u32
    }

    /// Get the current write head index.
    ///
    /// Equals the number of timestamps ever pushed (mod 2^32).
    #[inline]
    pub fn write_head(&self) -> u32 {
        self.write_idx.load(Ordering::Acquire)
    }

    /// Calculate how many entries behind a reader is.
    #[inline]
    pub fn lag(&self, reader_idx: u32) -> u32 {
        self.write_idx.load(Ordering::Acquire).wrapping_sub(reader_idx)
    }

    /// Check if a reader has fallen too far behind (overrun).
    ///
    /// If true, the reader's next entry is gone or about to be overwritten.
    #[inline]
    pub fn is_overrun(&self, reader_idx: u32) -> bool {
        self.lag(reader_idx) >= N as u32
    }

    /// Oldest index that is still safe to read.
    #[inline]
    pub fn oldest_readable(&self) -> u32 {
        self.write_head().wrapping_sub(N as u32 - 1)
    }
}

impl<const N: usize> Default for IntervalBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
