use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::framer::{ByteFramer, RawPacket};
use crate::protocols::lss::{Direction, Kind, parse_packet};
use crate::source::{ByteEvent, ByteSource, CsvFileSource, SourceError};
use crate::{CaptureSummary, DEFAULT_GENERATED_AT, FrameRecord, FrameTag, Report, make_stub_report};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Streaming decoder: one byte event in, at most one record out.
///
/// Parse failures are converted into error-tagged records and never
/// propagate; the framer state resets on every terminator regardless of
/// outcome, so decoding continues packet by packet.
///
/// # Examples
/// ```
/// use lsstap_core::{ByteEvent, FrameTag, LssDecoder};
///
/// let mut decoder = LssDecoder::new();
/// let mut records = Vec::new();
/// for (i, byte) in "#12D521\r".bytes().enumerate() {
///     let start = i as f64;
///     if let Some(record) = decoder.feed(&ByteEvent { start, end: start + 0.5, byte }) {
///         records.push(record);
///     }
/// }
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].tag, FrameTag::Request);
/// ```
#[derive(Debug, Default)]
pub struct LssDecoder {
    framer: ByteFramer,
}

impl LssDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, event: &ByteEvent) -> Option<FrameRecord> {
        let raw = self.framer.feed(event.byte, event.start, event.end)?;
        Some(record_from_raw(raw))
    }
}

/// Display name of a packet kind.
pub fn kind_name(kind: Kind) -> &'static str {
    match kind {
        Kind::Action => "Action",
        Kind::Query => "Query",
        Kind::Config => "Config",
    }
}

fn record_from_raw(raw: RawPacket) -> FrameRecord {
    match parse_packet(&raw.text) {
        Ok(packet) => {
            let tag = if !packet.known {
                FrameTag::Error
            } else if packet.direction == Direction::Request {
                FrameTag::Request
            } else {
                FrameTag::Reply
            };
            FrameRecord {
                tag,
                start: raw.start,
                end: raw.end,
                id: Some(packet.id.to_string()),
                kind: kind_name(packet.kind).to_string(),
                value: packet.value.display(),
                command: Some(packet.command),
                bytes: raw.text,
                description: packet.description.to_string(),
            }
        }
        Err(err) => FrameRecord {
            tag: FrameTag::Error,
            start: raw.start,
            end: raw.end,
            id: None,
            kind: "?".to_string(),
            command: None,
            value: None,
            bytes: raw.text,
            description: err.to_string(),
        },
    }
}

/// Decode a capture CSV export into a report.
pub fn decode_csv_file(path: &Path) -> Result<Report, AnalysisError> {
    let source = CsvFileSource::open(path)?;
    decode_source(path, source)
}

/// Decode every byte event of a source into a report.
pub fn decode_source<S: ByteSource>(path: &Path, mut source: S) -> Result<Report, AnalysisError> {
    let mut decoder = LssDecoder::new();
    let mut frames = Vec::new();
    let mut bytes_total = 0u64;
    let mut first_ts = None;
    let mut last_ts = None;

    while let Some(event) = source.next_byte()? {
        bytes_total += 1;
        update_ts_bounds(&mut first_ts, &mut last_ts, &event);
        if let Some(record) = decoder.feed(&event) {
            frames.push(record);
        }
    }

    let mut requests = 0u64;
    let mut replies = 0u64;
    let mut errors = 0u64;
    for record in &frames {
        match record.tag {
            FrameTag::Request => requests += 1,
            FrameTag::Reply => replies += 1,
            FrameTag::Error => errors += 1,
        }
    }

    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());
    report.generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string());
    report.capture_summary = Some(CaptureSummary {
        bytes_total,
        frames_total: frames.len() as u64,
        requests,
        replies,
        errors,
        time_start: first_ts,
        time_end: last_ts,
    });
    report.frames = frames;
    Ok(report)
}

fn update_ts_bounds(first: &mut Option<f64>, last: &mut Option<f64>, event: &ByteEvent) {
    if first.is_none_or(|existing| event.start < existing) {
        *first = Some(event.start);
    }
    if last.is_none_or(|existing| event.end > existing) {
        *last = Some(event.end);
    }
}
