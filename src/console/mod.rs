//! Line-based command protocol
//!
//! Host lines carry control tokens or free text for the peer device; peer
//! lines are relayed back to the host, optionally validated.
//! Zero heap allocation - all static buffers.

pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod error;
pub mod line_buffer;
pub mod parser;
pub mod receiver;

pub use commands::{
    execute, find_command, CommandContext, Outcome, RunState, COMMANDS, VERSION,
};
pub use console::{Console, INVALID_REPLY};
pub use error::ProtocolError;
pub use line_buffer::{LineBuffer, LINE_SIZE};
pub use parser::{validate_payload, Payload, PAYLOAD_FIELDS};
pub use receiver::{PeerLine, PeerReceiver, VALID_PREFIX};
