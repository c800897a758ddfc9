use thiserror::Error;

/// Errors raised by the LSS packet grammar parser.
///
/// Unknown-but-well-formed commands are not an error; they parse
/// successfully with `known = false`.
#[derive(Debug, Error)]
pub enum LssError {
    #[error("invalid packet: {reason}")]
    InvalidPacket { reason: &'static str },
    #[error("garbled value after command {command}: {extra}")]
    GarbledValue { command: String, extra: String },
}
