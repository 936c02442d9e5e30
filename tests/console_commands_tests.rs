//! Command handler tests

mod common;

use common::MockTransport;
use pulse_relay::console::commands::{execute, find_command, CommandContext, Outcome, RunState, COMMANDS};
use pulse_relay::console::VERSION;
use pulse_relay::transport::TransportError;

fn run(
    line: &str,
    state: &mut RunState,
    host: &mut MockTransport,
    peer: &mut MockTransport,
    forward: bool,
) -> Result<Outcome, TransportError> {
    let mut ctx = CommandContext {
        run_state: state,
        host,
        peer,
        device_id: "TEST",
        forward_control_tokens: forward,
    };
    execute(line, &mut ctx)
}

#[test]
fn test_command_registry_has_all_commands() {
    for name in ["s1", "s0", "info"] {
        assert!(
            COMMANDS.iter().any(|c| c.name == name),
            "Command '{}' should be in registry",
            name
        );
    }
}

#[test]
fn test_tokens_match_exactly() {
    assert!(find_command("s1").is_some());
    assert!(find_command("S1").is_none());
    assert!(find_command("s1x").is_none());
    assert!(find_command("inf").is_none());
}

#[test]
fn test_start_from_stopped() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;

    let outcome = run("s1", &mut state, &mut host, &mut peer, true);

    assert_eq!(outcome, Ok(Outcome::Control("s1")));
    assert_eq!(state, RunState::Running);
}

#[test]
fn test_stop_from_running() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Running;

    run("s0", &mut state, &mut host, &mut peer, true).unwrap();

    assert_eq!(state, RunState::Stopped);
}

#[test]
fn test_stop_while_stopped_is_noop() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;

    let outcome = run("s0", &mut state, &mut host, &mut peer, true);

    assert_eq!(outcome, Ok(Outcome::Control("s0")));
    assert_eq!(state, RunState::Stopped);
    assert!(host.output.is_empty());
}

#[test]
fn test_tokens_trimmed() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;

    run("  s1\r", &mut state, &mut host, &mut peer, false).unwrap();

    assert!(state.is_running());
}

#[test]
fn test_control_tokens_forwarded() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;

    run("s1", &mut state, &mut host, &mut peer, true).unwrap();
    assert_eq!(peer.text(), "s1\r\n");

    peer.clear_output();
    run("s0", &mut state, &mut host, &mut peer, false).unwrap();
    assert!(peer.output.is_empty());
    assert_eq!(state, RunState::Stopped);
}

#[test]
fn test_free_text_relayed_verbatim() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;

    let outcome = run(" u1,60 \r", &mut state, &mut host, &mut peer, true);

    assert_eq!(outcome, Ok(Outcome::Relayed));
    assert_eq!(peer.text(), "u1,60\r\n");
    assert!(host.output.is_empty());
    assert_eq!(state, RunState::Stopped);
}

#[test]
fn test_empty_line_does_nothing() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Running;

    let outcome = run("  \r", &mut state, &mut host, &mut peer, true);

    assert_eq!(outcome, Ok(Outcome::Empty));
    assert!(peer.output.is_empty());
    assert!(host.output.is_empty());
}

#[test]
fn test_info_reports_identity() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    let mut state = RunState::Stopped;

    run("info", &mut state, &mut host, &mut peer, false).unwrap();

    let lines = host.lines();
    assert_eq!(lines[0], "OpenBIS code: TEST");
    assert_eq!(lines[1], format!("Version: {}", VERSION));
    assert!(VERSION.starts_with("PulseRelay v"));
    assert_eq!(state, RunState::Stopped);
}

#[test]
fn test_relay_failure_propagates() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    peer.fail_writes = true;
    let mut state = RunState::Stopped;

    let outcome = run("hello", &mut state, &mut host, &mut peer, true);

    assert_eq!(outcome, Err(TransportError::Write));
}

#[test]
fn test_transition_applies_when_relay_fails() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    peer.fail_writes = true;
    let mut state = RunState::Stopped;

    assert_eq!(
        run("s1", &mut state, &mut host, &mut peer, true),
        Err(TransportError::Write)
    );
    assert_eq!(state, RunState::Running);

    assert_eq!(
        run("s0", &mut state, &mut host, &mut peer, true),
        Err(TransportError::Write)
    );
    assert_eq!(state, RunState::Stopped);
}

#[test]
fn test_info_answers_when_relay_fails() {
    let (mut host, mut peer) = (MockTransport::new(), MockTransport::new());
    peer.fail_writes = true;
    let mut state = RunState::Stopped;

    assert!(run("info", &mut state, &mut host, &mut peer, true).is_err());
    assert_eq!(host.lines()[0], "OpenBIS code: TEST");
}
