//! Host-side line accumulator

use super::{execute, CommandContext, LineBuffer, Outcome, ProtocolError};

/// Reply for malformed or overlong lines.
pub const INVALID_REPLY: &str = "invalid";

/// Host command console.
///
/// Fed one byte at a time from the host channel. `\n` completes a line;
/// nothing blocks and nothing allocates.
pub struct Console {
    line: LineBuffer,
    /// Dropping the tail of an overlong line until its newline
    discarding: bool,
}

impl Console {
    /// Create new console
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            discarding: false,
        }
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a line completed or was discarded, None if
    /// more input is needed. Malformed lines are answered with `invalid` on
    /// the host channel before the error is returned. After an overflow the
    /// rest of the line, up to its newline, is ignored.
    pub fn process_byte(
        &mut self,
        byte: u8,
        ctx: &mut CommandContext<'_>,
    ) -> Option<Result<Outcome, ProtocolError>> {
        if self.discarding {
            if byte == b'\n' {
                self.discarding = false;
            }
            return None;
        }

        if byte == b'\n' {
            let result = match self.line.as_str() {
                Ok(line) => execute(line, ctx).map_err(ProtocolError::from),
                Err(err) => Err(err),
            };
            self.line.clear();
            return Some(self.report(result, ctx));
        }

        match self.line.push(byte) {
            Ok(()) => None,
            Err(err) => {
                self.line.clear();
                self.discarding = true;
                Some(self.report(Err(err), ctx))
            }
        }
    }

    /// Drain every byte the host channel has ready.
    ///
    /// Returns the last completed line result, if any. A transport error is
    /// kept over any later result so the caller can record it.
    pub fn poll(&mut self, ctx: &mut CommandContext<'_>) -> Option<Result<Outcome, ProtocolError>> {
        let mut last = None;
        while ctx.host.available() > 0 {
            let Some(byte) = ctx.host.read_byte() else {
                break;
            };
            if let Some(result) = self.process_byte(byte, ctx) {
                if !matches!(last, Some(Err(ProtocolError::Transport(_)))) {
                    last = Some(result);
                }
            }
        }
        last
    }

    /// Bytes of the line in progress
    pub fn pending(&self) -> usize {
        self.line.len()
    }

    fn report(
        &self,
        result: Result<Outcome, ProtocolError>,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ProtocolError> {
        if let Err(err) = result {
            if err.is_invalid_input() {
                ctx.host.write_line(INVALID_REPLY)?;
            }
        }
        result
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
