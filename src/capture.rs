//! Edge capture (interrupt context).
//!
//! The ISR reads the timer and enqueues the raw timestamp. Nothing else:
//! no debounce, no reads of derived state, no logging. All filtering happens
//! in the main loop.

use crate::edge_buffer::{IntervalBuffer, EDGE_BUFFER_SIZE};
use crate::timing::Timestamp;

/// ISR-side handle to the edge buffer.
///
/// Typically a `static` so a raw interrupt handler can reach it:
///
/// ```ignore
/// static EDGES: IntervalBuffer = IntervalBuffer::new();
/// static CAPTURE: EdgeCapture = EdgeCapture::new(&EDGES);
///
/// unsafe extern "C" fn edge_isr(_: *mut c_void) {
///     CAPTURE.on_edge(Timestamp::from_micros_i64(esp_timer_get_time()));
/// }
/// ```
pub struct EdgeCapture<'a, const N: usize = EDGE_BUFFER_SIZE> {
    buffer: &'a IntervalBuffer<N>,
}

impl<'a, const N: usize> EdgeCapture<'a, N> {
    /// Bind to a buffer. The buffer must have exactly one `EdgeCapture`.
    pub const fn new(buffer: &'a IntervalBuffer<N>) -> Self {
        Self { buffer }
    }

    /// Record an edge at `now`.
    ///
    /// Unconditional and O(1). Overwrites the oldest unread entry when the
    /// main loop has fallen behind.
    #[inline(always)]
    pub fn on_edge(&self, now: Timestamp) {
        self.buffer.push(now);
    }

    /// Total edges captured since boot (wraps at 2^32).
    #[inline]
    pub fn captured(&self) -> u32 {
        self.buffer.write_head()
    }
}
