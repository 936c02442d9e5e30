//! Module: pipeline
//!
//! Purpose: Loop-side measurement pipeline. Owns every piece of mutable
//! measurement state so nothing lives at file scope.
//!
//! Architecture:
//! ```text
//! IntervalBuffer ──▶ EdgeConsumer ──▶ DebounceFilter ──▶ FrequencyTracker
//!                                           │
//!                                           └──▶ binary frame (host)
//! ```
//!
//! Draining, debounce and frequency tracking always run so baselines stay
//! fresh; [`RunState`] only gates what is written to the host.

use crate::config::PipelineConfig;
use crate::console::RunState;
use crate::consumer::EdgeConsumer;
use crate::debounce::{DebounceFilter, DebounceOutcome};
use crate::edge_buffer::{IntervalBuffer, EDGE_BUFFER_SIZE};
use crate::fault::{FaultCode, FaultState};
use crate::framer::{encode_frame, MotionSample, TelemetryRecord, MAX_RECORD_LEN};
use crate::frequency::FrequencyTracker;
use crate::log_globals::LOG_STREAM;
use crate::timing::{Interval, Timestamp};
use crate::transport::{Transport, TransportError, LINE_END};
use crate::{pipe_debug, pipe_error, pipe_info, pipe_trace, pipe_warn};

/// Counters for one [`Pipeline::poll`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Timestamps taken from the edge buffer
    pub dequeued: u32,
    /// Intervals that passed debounce
    pub accepted: u32,
    /// Edges rejected as bounce
    pub rejected: u32,
    /// Binary frames written to the host
    pub frames_sent: u32,
    /// Edges lost to buffer overrun since the previous poll
    pub dropped: u32,
    /// The stable timeout zeroed the frequency
    pub went_stale: bool,
}

/// Consolidated pipeline state.
pub struct Pipeline<'a, const N: usize = EDGE_BUFFER_SIZE> {
    config: PipelineConfig,
    consumer: EdgeConsumer<'a, N>,
    debounce: DebounceFilter,
    frequency: FrequencyTracker,
    run_state: RunState,
    fault: &'a FaultState,
    last_telemetry: Option<Timestamp>,
    dropped_total: u32,
    write_errors: u32,
}

impl<'a, const N: usize> Pipeline<'a, N> {
    /// Build the pipeline once at startup.
    ///
    /// Edges already in `buffer` are skipped.
    pub fn new(config: PipelineConfig, buffer: &'a IntervalBuffer<N>, fault: &'a FaultState) -> Self {
        Self {
            config,
            consumer: EdgeConsumer::new(buffer),
            debounce: DebounceFilter::new(config.dead_time),
            frequency: FrequencyTracker::new(config.change_threshold_hz, config.stable_timeout),
            run_state: RunState::from_flag(config.start_running),
            fault,
            last_telemetry: None,
            dropped_total: 0,
            write_errors: 0,
        }
    }

    /// Process every pending edge, then run the stale-frequency check.
    pub fn poll(&mut self, now: Timestamp, host: &mut dyn Transport) -> PollReport {
        let mut report = PollReport::default();
        let emit_frames = self.run_state.is_running() && self.config.binary_frames;

        while let Some(edge) = self.consumer.try_dequeue() {
            report.dequeued += 1;

            match self.debounce.accept(edge) {
                DebounceOutcome::Seeded => {
                    pipe_debug!(LOG_STREAM, now, "first edge at {} us", edge.as_micros());
                }
                DebounceOutcome::Rejected(delta) => {
                    report.rejected += 1;
                    pipe_trace!(LOG_STREAM, now, "bounce {} us", delta.as_micros());
                }
                DebounceOutcome::Accepted(interval) => {
                    report.accepted += 1;
                    self.frequency.on_interval(now, interval);

                    if emit_frames && self.send(host, &encode_frame(interval.as_micros()), now) {
                        report.frames_sent += 1;
                    }
                }
            }
        }

        let dropped = self.consumer.dropped();
        if dropped > 0 {
            self.consumer.reset_dropped();
            self.dropped_total = self.dropped_total.saturating_add(dropped);
            report.dropped = dropped;
            pipe_warn!(LOG_STREAM, now, "edge buffer overrun, {} edges lost", dropped);
        }

        let held_hz = self.frequency.last_significant();
        let held_since = self.frequency.last_significant_change();
        report.went_stale = self.frequency.tick(now);
        if report.went_stale {
            pipe_info!(
                LOG_STREAM,
                now,
                "frequency held at {:.4} Hz since {} us, forced to 0",
                held_hz,
                held_since.as_micros()
            );
        }

        report
    }

    /// Check whether a telemetry record is due at `now`.
    pub fn telemetry_due(&self, now: Timestamp) -> bool {
        if !self.config.telemetry || !self.run_state.is_running() {
            return false;
        }
        match self.last_telemetry {
            None => true,
            Some(last) => {
                now.elapsed_since(last) >= Interval::from_millis(self.config.telemetry_period_ms)
            }
        }
    }

    /// Write one telemetry record with the current frequency.
    ///
    /// Returns `true` if a record was written. Nothing is written while
    /// stopped or when telemetry is disabled.
    pub fn emit_telemetry(
        &mut self,
        now: Timestamp,
        uptime_ms: u32,
        motion: MotionSample,
        out: &mut dyn Transport,
    ) -> bool {
        if !self.config.telemetry || !self.run_state.is_running() {
            return false;
        }
        self.last_telemetry = Some(now);

        let record = TelemetryRecord {
            uptime_ms,
            frequency_hz: self.frequency.current(),
            motion,
        };

        let mut buf = [0u8; MAX_RECORD_LEN + LINE_END.len()];
        let len = match record.encode(&mut buf[..MAX_RECORD_LEN]) {
            Ok(len) => len,
            Err(err) => {
                pipe_error!(LOG_STREAM, now, "telemetry record: {}", err);
                return false;
            }
        };
        buf[len..len + LINE_END.len()].copy_from_slice(LINE_END);

        self.send(out, &buf[..len + LINE_END.len()], now)
    }

    /// Peer lines may go to the host unless binary frames are flowing.
    pub fn relays_peer_lines(&self) -> bool {
        !self.run_state.is_running() || !self.config.binary_frames
    }

    /// Current frequency in Hz (0 when stale or no signal).
    pub fn frequency(&self) -> f32 {
        self.frequency.current()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Mutable run state for the command console.
    pub fn run_state_mut(&mut self) -> &mut RunState {
        &mut self.run_state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Edges lost to overrun since boot.
    pub fn dropped_total(&self) -> u32 {
        self.dropped_total
    }

    /// Edges rejected as bounce since boot.
    pub fn rejected_total(&self) -> u32 {
        self.debounce.rejected()
    }

    /// Failed host writes since boot.
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    /// Record a failed write: non-fatal fault plus an error log entry.
    ///
    /// Used for pipeline output and for protocol replies and relays.
    pub fn record_write_failure(&mut self, now: Timestamp, channel: &str, err: TransportError) {
        self.write_errors = self.write_errors.saturating_add(1);
        self.fault.set(FaultCode::TransportWrite, self.write_errors);
        pipe_error!(LOG_STREAM, now, "{}: {}", channel, err);
    }

    fn send(&mut self, out: &mut dyn Transport, bytes: &[u8], now: Timestamp) -> bool {
        match out.write(bytes) {
            Ok(()) => true,
            Err(err) => {
                self.record_write_failure(now, "host", err);
                false
            }
        }
    }
}
