//! PulseRelay - Main entry point
//!
//! 1. Bring up UARTs, status LED and the edge ISR
//! 2. Build the pipeline from the board preset
//! 3. Run the cooperative loop: edges, telemetry, peer lines, host
//!    commands, log drain
//!
//! On any target other than ESP-IDF the binary is empty so the library
//! tests build on a workstation.

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::sys::{self, EspError};

    use pulse_relay::capture::EdgeCapture;
    use pulse_relay::config::BOARD_CONFIG;
    use pulse_relay::console::{
        CommandContext, Console, Outcome, PeerReceiver, ProtocolError, VERSION,
    };
    use pulse_relay::edge_buffer::IntervalBuffer;
    use pulse_relay::fault::{FaultCode, FaultState};
    use pulse_relay::framer::MotionSample;
    use pulse_relay::hal::gpio::{
        attach_edge_isr, blink_forever, init_status_led, set_status_led, EdgeInputConfig,
    };
    use pulse_relay::hal::uart::{
        open_log_uart, open_uart, LogUart, UartTransport, HOST_BAUD, PEER_BAUD,
    };
    use pulse_relay::hal::{MotionSource, NoMotion};
    use pulse_relay::pipeline::Pipeline;
    use pulse_relay::timing::Timestamp;
    use pulse_relay::uart_logger::drain_logs;
    use pulse_relay::{pipe_error, pipe_info, pipe_warn, LOG_STREAM};

    // Static allocations: the ISR reaches the buffer through EDGE_CAPTURE
    static EDGE_BUFFER: IntervalBuffer = IntervalBuffer::new();
    static EDGE_CAPTURE: EdgeCapture<'static> = EdgeCapture::new(&EDGE_BUFFER);
    static FAULT_STATE: FaultState = FaultState::new();

    /// Status LED blink period on a fatal fault.
    const FAULT_BLINK_MS: u32 = 200;

    struct Board {
        host: UartTransport<'static>,
        peer: UartTransport<'static>,
        log: LogUart<'static>,
    }

    fn now() -> Timestamp {
        // SAFETY: reads the free-running system timer
        Timestamp::from_micros_i64(unsafe { sys::esp_timer_get_time() })
    }

    fn uptime_ms() -> u32 {
        // SAFETY: reads the free-running system timer
        (unsafe { sys::esp_timer_get_time() } / 1_000) as u32
    }

    fn bring_up(edge: EdgeInputConfig) -> Result<Board, EspError> {
        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;

        init_status_led()?;

        let host = open_uart(peripherals.uart0, pins.gpio43, pins.gpio44, HOST_BAUD)?;
        let peer = open_uart(peripherals.uart1, pins.gpio17, pins.gpio18, PEER_BAUD)?;
        let log = open_log_uart(peripherals.uart2, pins.gpio6)?;

        attach_edge_isr(&edge, &EDGE_CAPTURE)?;

        Ok(Board { host, peer, log })
    }

    /// Record a fatal fault and never return.
    fn halt(code: FaultCode, data: u32) -> ! {
        debug_assert!(code.is_fatal());
        FAULT_STATE.set(code, data);
        pipe_error!(
            LOG_STREAM,
            now(),
            "FAULT: {} ({}), {} since boot",
            code.as_str(),
            data,
            FAULT_STATE.count()
        );
        // Best effort: the LED pin may be the thing that failed
        let _ = init_status_led();
        blink_forever(FAULT_BLINK_MS)
    }

    pub fn run() -> ! {
        sys::link_patches();

        let config = BOARD_CONFIG;
        LOG_STREAM.set_max_level(config.log_level);

        if let Err(err) = config.validate() {
            pipe_error!(LOG_STREAM, now(), "config: {}", err);
            halt(FaultCode::Config, 0);
        }

        let mut board = match bring_up(EdgeInputConfig::new(config.edge)) {
            Ok(board) => board,
            Err(err) => halt(FaultCode::PeripheralInit, err.code() as u32),
        };

        let mut motion = NoMotion;
        if let Err(err) = motion.init() {
            pipe_error!(LOG_STREAM, now(), "motion: {}", err);
            halt(FaultCode::SensorInit, 0);
        }

        let mut pipeline = Pipeline::new(config, &EDGE_BUFFER, &FAULT_STATE);
        let mut console = Console::new();
        let mut receiver = PeerReceiver::new(config.validate_peer_lines);

        pipe_info!(
            LOG_STREAM,
            now(),
            "{} device {} {} edge, {}",
            VERSION,
            config.device_id,
            config.edge.as_str(),
            pipeline.run_state().as_str()
        );
        drain_logs(&LOG_STREAM, &mut board.log);

        loop {
            let now = now();

            pipeline.poll(now, &mut board.host);

            if pipeline.telemetry_due(now) {
                let sample = motion.sample().unwrap_or_else(|err| {
                    pipe_warn!(LOG_STREAM, now, "motion: {}", err);
                    MotionSample::ZERO
                });
                pipeline.emit_telemetry(now, uptime_ms(), sample, &mut board.host);
            }

            if pipeline.relays_peer_lines() {
                if let Err(err) = receiver.poll(&mut board.peer, &mut board.host) {
                    pipeline.record_write_failure(now, "peer relay", err);
                }
            }

            let mut ctx = CommandContext {
                run_state: pipeline.run_state_mut(),
                host: &mut board.host,
                peer: &mut board.peer,
                device_id: config.device_id,
                forward_control_tokens: config.forward_control_tokens,
            };
            match console.poll(&mut ctx) {
                Some(Ok(Outcome::Control(name))) => {
                    pipe_info!(
                        LOG_STREAM,
                        now,
                        "{} -> {}, {} rejected, {} dropped",
                        name,
                        pipeline.run_state().as_str(),
                        pipeline.rejected_total(),
                        pipeline.dropped_total()
                    );
                }
                Some(Err(ProtocolError::Transport(err))) => {
                    pipeline.record_write_failure(now, "command", err);
                }
                Some(Err(err)) => {
                    pipe_warn!(LOG_STREAM, now, "host line: {}", err);
                }
                _ => {}
            }

            set_status_led(FAULT_STATE.is_active());
            drain_logs(&LOG_STREAM, &mut board.log);

            FreeRtos::delay_ms(1);
        }
    }
}

fn main() {
    #[cfg(target_os = "espidf")]
    firmware::run();
}
