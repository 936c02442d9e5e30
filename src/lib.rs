//! # PulseRelay
//!
//! Interrupt-driven pulse interval capture and serial relay firmware.
//!
//! ## Architecture
//!
//! ```text
//! GPIO ISR ──▶ EdgeCapture ──▶ IntervalBuffer ──▶ Pipeline (main loop)
//!                                                   │  DebounceFilter
//!                                                   │  FrequencyTracker
//!                                                   ▼
//!                                  binary frames / telemetry ──▶ host
//!
//! host lines ──▶ Console ──▶ RunState, peer relay
//! peer lines ──▶ PeerReceiver ──▶ host (verbatim or validated)
//! ```
//!
//! The ISR only timestamps and enqueues. Everything else runs in the
//! cooperative loop; nothing blocks and nothing allocates.

#![cfg_attr(not(test), no_std)]

pub mod capture;
pub mod config;
pub mod console;
pub mod consumer;
pub mod debounce;
pub mod edge_buffer;
pub mod fault;
pub mod framer;
pub mod frequency;
pub mod hal;
pub mod log_globals;
pub mod logging;
pub mod pipeline;
pub mod timing;
pub mod transport;
pub mod uart_logger;

pub use capture::EdgeCapture;
pub use config::{PipelineConfig, BOARD_CONFIG};
pub use consumer::EdgeConsumer;
pub use debounce::{DebounceFilter, DebounceOutcome};
pub use edge_buffer::{IntervalBuffer, EDGE_BUFFER_SIZE};
pub use fault::{FaultCode, FaultState};
pub use frequency::FrequencyTracker;
pub use log_globals::LOG_STREAM;
pub use pipeline::{Pipeline, PollReport};
pub use timing::{EdgeDirection, Interval, Timestamp};
pub use transport::{Transport, TransportError};
