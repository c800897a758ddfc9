use super::error::LssError;
use super::scanner::Scanner;
use super::table;

/// Which side of the bus sent the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Sent to the device (`#`).
    Request,
    /// Sent from the device (`*`).
    Reply,
}

/// Operation category; the default when no kind letter is present is Action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Action,
    Query,
    Config,
}

/// Packet payload, fully resolved during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Absent,
    Integer(i32),
    Text(String),
}

impl Value {
    /// String form for display layers; `None` when absent.
    pub fn display(&self) -> Option<String> {
        match self {
            Value::Absent => None,
            Value::Integer(value) => Some(value.to_string()),
            Value::Text(text) => Some(text.clone()),
        }
    }
}

/// One parsed LSS packet.
#[derive(Debug, Clone, PartialEq)]
pub struct LssPacket {
    pub direction: Direction,
    pub id: u32,
    pub kind: Kind,
    /// Command code, normalized to uppercase.
    pub command: String,
    pub value: Value,
    /// Table description, or [`table::UNKNOWN_COMMAND`] when `known` is false.
    pub description: &'static str,
    pub known: bool,
}

/// Parse one framed packet (terminator already stripped).
///
/// The grammar is consumed field by field: direction marker, device id,
/// optional kind letter, command letters, optional signed integer, trailing
/// text. The whole input must be consumed. Trailing text is only meaningful
/// for the three string-reply commands (MS, F, N) in Reply+Query context;
/// anywhere else it voids the numeric value.
///
/// # Examples
/// ```
/// use lsstap_core::{Direction, Kind, Value, parse_packet};
///
/// let packet = parse_packet("#12D521")?;
/// assert_eq!(packet.direction, Direction::Request);
/// assert_eq!(packet.kind, Kind::Action);
/// assert_eq!(packet.value, Value::Integer(521));
/// # Ok::<(), lsstap_core::LssError>(())
/// ```
pub fn parse_packet(text: &str) -> Result<LssPacket, LssError> {
    let mut scanner = Scanner::new(text);

    let direction = match scanner.take_direction() {
        Some('#') => Direction::Request,
        Some('*') => Direction::Reply,
        _ => {
            return Err(LssError::InvalidPacket {
                reason: "missing direction marker",
            });
        }
    };

    let digits = scanner.take_digits().ok_or(LssError::InvalidPacket {
        reason: "missing device id",
    })?;
    let id: u32 = digits.parse().map_err(|_| LssError::InvalidPacket {
        reason: "device id out of range",
    })?;

    let kind = match scanner.take_kind() {
        Some('Q') => Kind::Query,
        Some('C') => Kind::Config,
        _ => Kind::Action,
    };

    let letters = scanner.take_letters();
    let number = scanner.take_signed_number();
    let mut extra = scanner.take_extra().to_string();
    if !scanner.is_empty() {
        return Err(LssError::InvalidPacket {
            reason: "unexpected trailing bytes",
        });
    }

    // the lone Q command for query status
    let mut command = if kind == Kind::Query && letters.is_empty() {
        "Q".to_string()
    } else {
        letters.to_ascii_uppercase()
    };

    let mut value = match number {
        // only a minus matched; not an integer value
        Some("-") => {
            extra.insert(0, '-');
            Value::Absent
        }
        Some(digits) => Value::Integer(digits.parse().map_err(|_| LssError::InvalidPacket {
            reason: "numeric value out of range",
        })?),
        None => Value::Absent,
    };

    if !extra.is_empty() {
        if direction == Direction::Reply && kind == Kind::Query {
            // string replies: the command remainder is part of the value
            if let Some(prefix) = ["MS", "F", "N"].iter().find(|p| command.starts_with(*p)) {
                value = Value::Text(format!("{}{}", &letters[prefix.len()..], extra));
                command = (*prefix).to_string();
            } else {
                return Err(LssError::GarbledValue { command, extra });
            }
        } else {
            value = Value::Absent;
        }
    }

    let (description, known) = match table::describe_command(&command) {
        Some(description) => (description, true),
        None => (table::UNKNOWN_COMMAND, false),
    };

    Ok(LssPacket {
        direction,
        id,
        kind,
        command,
        value,
        description,
        known,
    })
}
