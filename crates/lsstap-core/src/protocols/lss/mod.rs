mod error;
mod parser;
mod scanner;
mod table;

pub use error::LssError;
pub use parser::{Direction, Kind, LssPacket, Value, parse_packet};
pub use table::{UNKNOWN_COMMAND, describe_command, modifier_description};
