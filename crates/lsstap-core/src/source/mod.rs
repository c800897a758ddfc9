mod csv;

pub use csv::CsvFileSource;

use thiserror::Error;

/// One captured byte with its sampling window, in capture-relative seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ByteEvent {
    pub start: f64,
    pub end: f64,
    pub byte: u8,
}

/// A stream of timestamped byte events.
pub trait ByteSource {
    fn next_byte(&mut self) -> Result<Option<ByteEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV parse error at line {line}: {message}")]
    Csv { line: usize, message: String },
}
