//! Byte accumulation into carriage-return terminated packets.
//!
//! The framer never fails: non-printable bytes inside a packet are dropped
//! (tolerance policy for glitched captures), and a terminator always resets
//! the pending state regardless of what the parser later makes of the text.

const TERMINATOR: u8 = b'\r';

/// A framed but not yet parsed packet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPacket {
    /// Accumulated printable text, terminator excluded.
    pub text: String,
    /// Start timestamp of the first accumulated byte (or of the terminator
    /// itself when it arrived while idle).
    pub start: f64,
    /// End timestamp of the terminator byte.
    pub end: f64,
}

#[derive(Debug)]
struct Pending {
    text: String,
    start: f64,
}

/// Accumulates one timestamped byte at a time into [`RawPacket`]s.
///
/// There is no maximum buffer length; a stream lacking a terminator simply
/// accumulates until one arrives.
#[derive(Debug, Default)]
pub struct ByteFramer {
    pending: Option<Pending>,
}

impl ByteFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte event; returns a packet when this byte terminates one.
    ///
    /// An empty pending buffer is still handed out on a terminator so the
    /// parser can report it as invalid.
    pub fn feed(&mut self, byte: u8, start: f64, end: f64) -> Option<RawPacket> {
        if byte == TERMINATOR {
            let (text, packet_start) = match self.pending.take() {
                Some(pending) => (pending.text, pending.start),
                None => (String::new(), start),
            };
            return Some(RawPacket {
                text,
                start: packet_start,
                end,
            });
        }

        if !byte.is_ascii() || byte.is_ascii_control() {
            // tolerated: dropped without touching the pending packet
            return None;
        }

        match &mut self.pending {
            Some(pending) => pending.text.push(byte as char),
            None => {
                self.pending = Some(Pending {
                    text: (byte as char).to_string(),
                    start,
                })
            }
        }
        None
    }

    /// True when no packet is being accumulated.
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}
