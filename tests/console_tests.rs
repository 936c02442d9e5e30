//! Host console and peer receiver tests

mod common;

use common::MockTransport;
use pulse_relay::console::{
    CommandContext, Console, Outcome, PeerLine, PeerReceiver, ProtocolError, RunState, LINE_SIZE,
};
use pulse_relay::transport::TransportError;

#[test]
fn test_console_line_completes_on_newline() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;
    let mut console = Console::new();
    host.feed(b"s1\r\n");

    let mut ctx = CommandContext {
        run_state: &mut state,
        host: &mut host,
        peer: &mut peer,
        device_id: "TEST",
        forward_control_tokens: true,
    };
    let result = console.poll(&mut ctx);

    assert_eq!(result, Some(Ok(Outcome::Control("s1"))));
    assert_eq!(state, RunState::Running);
    assert_eq!(console.pending(), 0);
}

#[test]
fn test_console_partial_line_waits() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;
    let mut console = Console::new();

    host.feed(b"s");
    let mut ctx = CommandContext {
        run_state: &mut state,
        host: &mut host,
        peer: &mut peer,
        device_id: "TEST",
        forward_control_tokens: true,
    };
    assert_eq!(console.poll(&mut ctx), None);
    assert_eq!(console.pending(), 1);

    host.feed(b"1\n");
    let mut ctx = CommandContext {
        run_state: &mut state,
        host: &mut host,
        peer: &mut peer,
        device_id: "TEST",
        forward_control_tokens: true,
    };
    assert_eq!(console.poll(&mut ctx), Some(Ok(Outcome::Control("s1"))));
    assert!(state.is_running());
    assert_eq!(peer.text(), "s1\r\n");
}

#[test]
fn test_console_overflow_reports_invalid() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;
    let mut console = Console::new();
    host.feed(&[b'a'; LINE_SIZE + 1]);

    let mut ctx = CommandContext {
        run_state: &mut state,
        host: &mut host,
        peer: &mut peer,
        device_id: "TEST",
        forward_control_tokens: true,
    };
    let result = console.poll(&mut ctx);

    assert_eq!(result, Some(Err(ProtocolError::LineTooLong)));
    assert_eq!(console.pending(), 0);
    assert_eq!(host.text(), "invalid\r\n");
    assert!(peer.output.is_empty());
}

#[test]
fn test_console_recovers_after_overflow() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;
    let mut console = Console::new();
    host.feed(&[b'a'; LINE_SIZE + 1]);
    host.feed(b"\ns1\n");

    let mut ctx = CommandContext {
        run_state: &mut state,
        host: &mut host,
        peer: &mut peer,
        device_id: "TEST",
        forward_control_tokens: false,
    };
    assert_eq!(console.poll(&mut ctx), Some(Ok(Outcome::Control("s1"))));
    assert!(state.is_running());
}

#[test]
fn test_relay_mode_echoes_verbatim() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut receiver = PeerReceiver::new(false);
    peer.feed(b"counts 12\r\nabc\n");

    assert_eq!(receiver.poll(&mut peer, &mut host), Ok(2));
    assert_eq!(host.text(), "counts 12\r\nabc\r\n");
}

#[test]
fn test_validation_mode_valid_line() {
    let mut host = MockTransport::new();
    let mut receiver = PeerReceiver::new(true);

    let mut result = None;
    for &b in b"1,2,3,4,5,6\r\n" {
        result = receiver.process_byte(b, &mut host).or(result);
    }

    assert_eq!(result, Some(Ok(PeerLine::Valid)));
    assert_eq!(host.text(), "Message is valid: 1,2,3,4,5,6\r\n");
}

#[test]
fn test_validation_mode_invalid_line() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut receiver = PeerReceiver::new(true);
    peer.feed(b"1,2,3,4,5\n1,,3,4,5,6\n-1,2,-3,4,5,6\n");

    assert_eq!(receiver.poll(&mut peer, &mut host), Ok(3));
    assert_eq!(
        host.lines(),
        ["invalid", "invalid", "Message is valid: -1,2,-3,4,5,6"]
    );
}

#[test]
fn test_peer_overflow_reports_invalid() {
    let mut host = MockTransport::new();
    let mut receiver = PeerReceiver::new(false);

    let mut last = None;
    for _ in 0..=LINE_SIZE {
        last = receiver.process_byte(b'9', &mut host);
    }

    assert_eq!(last, Some(Ok(PeerLine::Invalid(ProtocolError::LineTooLong))));
    assert_eq!(host.text(), "invalid\r\n");

    // Rest of the overlong line is dropped, the next one starts clean
    for &b in b"tail\nok\n" {
        receiver.process_byte(b, &mut host);
    }
    assert_eq!(host.lines(), ["invalid", "ok"]);
}

#[test]
fn test_console_overflow_tail_is_not_executed() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;
    let mut console = Console::new();
    host.feed(&[b'a'; LINE_SIZE]);
    host.feed(b"xs1\n");

    let mut ctx = CommandContext {
        run_state: &mut state,
        host: &mut host,
        peer: &mut peer,
        device_id: "TEST",
        forward_control_tokens: true,
    };
    assert_eq!(console.poll(&mut ctx), Some(Err(ProtocolError::LineTooLong)));

    assert_eq!(state, RunState::Stopped);
    assert_eq!(host.text(), "invalid\r\n");
    assert!(peer.output.is_empty());
    assert_eq!(console.pending(), 0);
}

#[test]
fn test_console_reports_reply_failure_over_later_lines() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;
    let mut console = Console::new();
    host.fail_writes = true;
    host.feed(b"info\ns1\n");

    let mut ctx = CommandContext {
        run_state: &mut state,
        host: &mut host,
        peer: &mut peer,
        device_id: "TEST",
        forward_control_tokens: false,
    };
    assert_eq!(
        console.poll(&mut ctx),
        Some(Err(ProtocolError::Transport(TransportError::Write)))
    );
    // The later line still ran
    assert!(state.is_running());
}

#[test]
fn test_relay_reports_host_write_failure() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut receiver = PeerReceiver::new(false);
    host.fail_writes = true;
    peer.feed(b"counts 12\nabc\n");

    assert_eq!(receiver.poll(&mut peer, &mut host), Err(TransportError::Write));
    // Input is consumed even though nothing reached the host
    assert!(peer.input.is_empty());

    host.fail_writes = false;
    peer.feed(b"next\n");
    assert_eq!(receiver.poll(&mut peer, &mut host), Ok(1));
    assert_eq!(host.text(), "next\r\n");
}

#[test]
fn test_validation_reports_host_write_failure() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut receiver = PeerReceiver::new(true);
    host.fail_writes = true;
    peer.feed(b"1,2,3,4,5,6\nbad\n");

    assert_eq!(receiver.poll(&mut peer, &mut host), Err(TransportError::Write));
}
