//! Edge buffer consumer for the main loop.
//!
//! # Contract
//!
//! "I process when I can. I skip if I fall behind."
//!
//! The consumer never blocks and never faults. If the ISR laps it, it skips
//! forward to the oldest entry still safe to read and counts what it lost.
//! Losing edges under sustained overload shows up only as a gap in the
//! output rate.

use crate::edge_buffer::{IntervalBuffer, EDGE_BUFFER_SIZE};
use crate::timing::Timestamp;

/// Single consumer of an [`IntervalBuffer`].
///
/// # Example
///
/// ```ignore
/// static EDGES: IntervalBuffer = IntervalBuffer::new();
///
/// let mut consumer = EdgeConsumer::new(&EDGES);
///
/// loop {
///     while let Some(timestamp) = consumer.try_dequeue() {
///         debounce.accept(timestamp);
///     }
/// }
/// ```
pub struct EdgeConsumer<'a, const N: usize = EDGE_BUFFER_SIZE> {
    buffer: &'a IntervalBuffer<N>,
    read_idx: u32,
    dropped: u32,
}

impl<'a, const N: usize> EdgeConsumer<'a, N> {
    /// Create a consumer positioned at the current write head.
    ///
    /// Edges captured before this call are not delivered.
    pub fn new(buffer: &'a IntervalBuffer<N>) -> Self {
        Self {
            buffer,
            read_idx: buffer.write_head(),
            dropped: 0,
        }
    }

    /// Take the next timestamp, if any.
    ///
    /// Non-blocking. Returns `None` when caught up with the producer.
    /// Entries are delivered in capture order; when the producer has lapped
    /// the consumer, the oldest unread entries are skipped.
    #[inline]
    pub fn try_dequeue(&mut self) -> Option<Timestamp> {
        loop {
            let lag = self.buffer.lag(self.read_idx);
            if lag == 0 {
                return None;
            }

            if self.buffer.is_overrun(self.read_idx) {
                let oldest = self.buffer.oldest_readable();
                let skipped = oldest.wrapping_sub(self.read_idx);
                self.read_idx = oldest;
                self.dropped = self.dropped.saturating_add(skipped);
                continue;
            }

            match self.buffer.read(self.read_idx) {
                Some(timestamp) => {
                    self.read_idx = self.read_idx.wrapping_add(1);
                    return Some(timestamp);
                }
                // Lapped while reading, next pass skips forward
                None => continue,
            }
        }
    }

    /// Drain all available timestamps.
    #[inline]
    pub fn drain(&mut self) -> DrainIterator<'_, 'a, N> {
        DrainIterator { consumer: self }
    }

    /// Get count of dropped timestamps (due to falling behind).
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&mut self) {
        self.dropped = 0;
    }

    /// Get current lag (entries behind producer).
    #[inline]
    pub fn lag(&self) -> u32 {
        self.buffer.lag(self.read_idx)
    }
}

/// Iterator for draining all available timestamps.
pub struct DrainIterator<'c, 'a, const N: usize> {
    consumer: &'c mut EdgeConsumer<'a, N>,
}

impl<'c, 'a, const N: usize> Iterator for DrainIterator<'c, 'a, N> {
    type Item = Timestamp;

    fn next(&mut self) -> Option<Self::Item> {
        self.consumer.try_dequeue()
    }
}
