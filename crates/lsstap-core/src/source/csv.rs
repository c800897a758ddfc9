use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use super::{ByteEvent, ByteSource, SourceError};

/// Reads timestamped byte events from a capture CSV export.
///
/// Expected rows are `start,end,byte` with timestamps in seconds and the
/// byte value in decimal or `0x`-prefixed hex. Blank lines are skipped and
/// a single leading header row is tolerated.
pub struct CsvFileSource {
    lines: Lines<BufReader<File>>,
    line_no: usize,
    header_skipped: bool,
    seen_data: bool,
}

impl CsvFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
            header_skipped: false,
            seen_data: false,
        })
    }
}

impl ByteSource for CsvFileSource {
    fn next_byte(&mut self) -> Result<Option<ByteEvent>, SourceError> {
        loop {
            let line = match self.lines.next() {
                Some(line) => line?,
                None => return Ok(None),
            };
            self.line_no += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_row(line) {
                Ok(event) => {
                    self.seen_data = true;
                    return Ok(Some(event));
                }
                // one header row on the first non-blank line is tolerated
                Err(_) if !self.seen_data && !self.header_skipped => {
                    self.header_skipped = true;
                    continue;
                }
                Err(message) => {
                    return Err(SourceError::Csv {
                        line: self.line_no,
                        message,
                    });
                }
            }
        }
    }
}

fn parse_row(line: &str) -> Result<ByteEvent, String> {
    let mut fields = line.split(',').map(str::trim);
    let start = fields.next().unwrap_or_default();
    let end = fields.next().ok_or_else(|| "missing end field".to_string())?;
    let byte = fields
        .next()
        .ok_or_else(|| "missing byte field".to_string())?;
    if fields.next().is_some() {
        return Err("expected exactly 3 fields".to_string());
    }

    let start: f64 = start
        .parse()
        .map_err(|_| format!("bad start timestamp {start:?}"))?;
    let end: f64 = end
        .parse()
        .map_err(|_| format!("bad end timestamp {end:?}"))?;
    let byte = parse_byte_field(byte)?;
    Ok(ByteEvent { start, end, byte })
}

fn parse_byte_field(field: &str) -> Result<u8, String> {
    let parsed = match field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => field.parse(),
    };
    parsed.map_err(|_| format!("bad byte value {field:?}"))
}
