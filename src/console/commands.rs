//! Command handlers
//!
//! Host lines are relayed to the peer device, then matched against the
//! control token table. Only exact matches (after trimming) are tokens.

use super::parser::trim_command;
use crate::transport::{Transport, TransportError};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Measurement enable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

impl RunState {
    /// Initial state from configuration.
    pub const fn from_flag(running: bool) -> Self {
        if running {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    /// `STOPPED -> RUNNING`. Returns `true` if the state changed.
    pub fn start(&mut self) -> bool {
        let changed = *self == RunState::Stopped;
        *self = RunState::Running;
        changed
    }

    /// `RUNNING -> STOPPED`. Returns `true` if the state changed.
    pub fn stop(&mut self) -> bool {
        let changed = *self == RunState::Running;
        *self = RunState::Stopped;
        changed
    }

    pub fn is_running(&self) -> bool {
        *self == RunState::Running
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
        }
    }
}

/// Everything a command may touch.
pub struct CommandContext<'a> {
    pub run_state: &'a mut RunState,
    /// Channel the command came from; replies go here.
    pub host: &'a mut dyn Transport,
    /// Downstream device that receives relayed lines.
    pub peer: &'a mut dyn Transport,
    pub device_id: &'a str,
    /// Relay control tokens to the peer as well.
    pub forward_control_tokens: bool,
}

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub handler: fn(&mut CommandContext<'_>) -> Result<(), TransportError>,
}

/// All control tokens
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "s1", handler: cmd_start }, // start measurement
    CommandDescriptor { name: "s0", handler: cmd_stop }, // stop measurement
    CommandDescriptor { name: "info", handler: cmd_info }, // device identity
];

/// What a host line did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank line, nothing sent
    Empty,
    /// Free text relayed to the peer
    Relayed,
    /// Control token handled (and relayed if forwarding is on)
    Control(&'static str),
}

/// Look up a control token by exact name
pub fn find_command(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Execute one host line (newline already removed).
pub fn execute(line: &str, ctx: &mut CommandContext<'_>) -> Result<Outcome, TransportError> {
    let line = trim_command(line);
    if line.is_empty() {
        return Ok(Outcome::Empty); // Empty line, do nothing
    }

    let Some(command) = find_command(line) else {
        ctx.peer.write_line(line)?;
        return Ok(Outcome::Relayed);
    };

    // The transition applies even when the relay fails
    let handled = (command.handler)(ctx);
    if ctx.forward_control_tokens {
        ctx.peer.write_line(line)?;
    }
    handled?;
    Ok(Outcome::Control(command.name))
}

// --- Command Implementations ---

fn cmd_start(ctx: &mut CommandContext<'_>) -> Result<(), TransportError> {
    ctx.run_state.start();
    Ok(())
}

fn cmd_stop(ctx: &mut CommandContext<'_>) -> Result<(), TransportError> {
    ctx.run_state.stop();
    Ok(())
}

fn cmd_info(ctx: &mut CommandContext<'_>) -> Result<(), TransportError> {
    use core::fmt::Write;

    let mut line = ReplyBuffer::new();
    let _ = write!(line, "OpenBIS code: {}", ctx.device_id);
    ctx.host.write_line(line.as_str())?;

    line.clear();
    let _ = write!(line, "Version: {}", VERSION);
    ctx.host.write_line(line.as_str())
}

/// Small formatting buffer for replies
struct ReplyBuffer {
    buf: [u8; 96],
    len: usize,
}

impl ReplyBuffer {
    fn new() -> Self {
        Self { buf: [0u8; 96], len: 0 }
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl core::fmt::Write for ReplyBuffer {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        // Truncate on a char boundary so as_str stays valid
        let available = self.buf.len() - self.len;
        let mut to_copy = s.len().min(available);
        while !s.is_char_boundary(to_copy) {
            to_copy -= 1;
        }
        self.buf[self.len..self.len + to_copy].copy_from_slice(&s.as_bytes()[..to_copy]);
        self.len += to_copy;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_state_transitions() {
        let mut state = RunState::from_flag(false);
        assert!(state.start());
        assert!(state.is_running());
        assert!(!state.start());
        assert!(state.stop());
        assert!(!state.stop());
        assert_eq!(state, RunState::Stopped);
    }

    #[test]
    fn test_reply_buffer_truncates_on_char_boundary() {
        use core::fmt::Write;

        let mut buf = ReplyBuffer::new();
        for _ in 0..95 {
            let _ = buf.write_str("a");
        }
        let _ = buf.write_str("é");
        assert_eq!(buf.as_str().len(), 95);
    }
}
