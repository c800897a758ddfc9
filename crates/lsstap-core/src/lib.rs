//! LSSTap core library for post-mortem serial capture analysis.
//!
//! This crate implements the offline decoding pipeline used by the CLI:
//! byte sources feed the stream decoder, which drives the byte framer and
//! the LSS packet grammar parser and aggregates results into a deterministic
//! report. Decoding is byte-oriented and side-effect free; all I/O is
//! isolated in `source` modules. Protocol grammar conventions are captured
//! in the scanner so the parser stays minimal and explicit.
//!
//! Invariants:
//! - Report outputs are deterministic and stable across runs.
//! - Exactly one record is produced per carriage-return terminated packet,
//!   in stream order; a parse failure never aborts the stream.
//! - Framer state resets unconditionally on every terminator byte.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use lsstap_core::decode_csv_file;
//!
//! let report = decode_csv_file(Path::new("capture.csv"))?;
//! println!("report version: {}", report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod framer;
mod protocols;
mod source;

pub use analysis::{AnalysisError, LssDecoder, decode_csv_file, decode_source, kind_name};
pub use framer::{ByteFramer, RawPacket};
pub use protocols::lss::{
    Direction, Kind, LssError, LssPacket, UNKNOWN_COMMAND, Value, describe_command,
    modifier_description, parse_packet,
};
pub use source::{ByteEvent, ByteSource, CsvFileSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no generation time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Aggregated decode report with records in stream order.
///
/// # Examples
/// ```
/// use lsstap_core::make_stub_report;
///
/// let report = make_stub_report("capture.csv", 123);
/// assert_eq!(report.report_version, lsstap_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,

    /// Input capture metadata.
    pub input: InputInfo,

    /// Optional capture summary (may be absent when unavailable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_summary: Option<CaptureSummary>,
    /// Decoded frame records, one per completed packet, in stream order.
    pub frames: Vec<FrameRecord>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "lsstap").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Capture-level decode summary.
///
/// Timestamps are capture-relative seconds, as exported by the capture tool.
///
/// # Examples
/// ```
/// use lsstap_core::CaptureSummary;
///
/// let summary = CaptureSummary {
///     bytes_total: 10,
///     frames_total: 1,
///     requests: 1,
///     replies: 0,
///     errors: 0,
///     time_start: None,
///     time_end: None,
/// };
/// assert_eq!(summary.bytes_total, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSummary {
    /// Total byte events observed in the capture.
    pub bytes_total: u64,
    /// Total completed packets (all tags).
    pub frames_total: u64,
    /// Records tagged `request`.
    pub requests: u64,
    /// Records tagged `reply`.
    pub replies: u64,
    /// Records tagged `error` (parse failures and unknown commands).
    pub errors: u64,
    /// Timestamp of the first byte event (if any).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<f64>,
    /// End timestamp of the last byte event (if any).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<f64>,
}

/// Display tag of a decoded frame record.
///
/// `Error` covers both parse failures and well-formed packets whose command
/// is not in the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameTag {
    Request,
    Reply,
    Error,
}

/// One decoded packet, as surfaced to display and filtering layers.
///
/// Field presence follows the outcome: parse failures carry only `kind`
/// (`"?"`), the raw bytes and the failure message; successful parses carry
/// the full field set with `value` omitted when the packet had no payload.
///
/// # Examples
/// ```
/// use lsstap_core::{FrameRecord, FrameTag};
///
/// let record = FrameRecord {
///     tag: FrameTag::Request,
///     start: 0.0,
///     end: 0.1,
///     id: Some("12".to_string()),
///     kind: "Action".to_string(),
///     command: Some("D".to_string()),
///     value: Some("521".to_string()),
///     bytes: "#12D521".to_string(),
///     description: "Position in Degrees".to_string(),
/// };
/// assert_eq!(record.tag, FrameTag::Request);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Display tag (`request`, `reply` or `error`).
    pub tag: FrameTag,
    /// Timestamp of the first byte of the packet.
    pub start: f64,
    /// End timestamp of the terminator byte.
    pub end: f64,
    /// Addressed device identifier, decimal form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Operation kind name: `Action`, `Query`, `Config`, or `?`.
    pub kind: String,
    /// Normalized command code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Payload in string form; omitted when the packet carried none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Raw packet text as framed (terminator excluded).
    pub bytes: String,
    /// Command description, "Unknown command", or the failure message.
    pub description: String,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use lsstap_core::make_stub_report;
///
/// let report = make_stub_report("capture.csv", 123);
/// assert!(report.frames.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "lsstap".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        capture_summary: None,
        frames: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_optional_fields_when_none() {
        let mut report = make_stub_report("capture.csv", 1);
        report.capture_summary = Some(CaptureSummary {
            bytes_total: 8,
            frames_total: 1,
            requests: 1,
            replies: 0,
            errors: 0,
            time_start: None,
            time_end: None,
        });
        report.frames = vec![FrameRecord {
            tag: FrameTag::Error,
            start: 0.0,
            end: 0.1,
            id: None,
            kind: "?".to_string(),
            command: None,
            value: None,
            bytes: "!!".to_string(),
            description: "invalid packet: missing direction marker".to_string(),
        }];

        let value = serde_json::to_value(&report).expect("report json");
        let summary = value.get("capture_summary").expect("capture_summary");
        assert!(summary.get("time_start").is_none());
        assert!(summary.get("time_end").is_none());

        let frame = &value["frames"][0];
        assert_eq!(frame["tag"], "error");
        assert_eq!(frame["kind"], "?");
        assert!(frame.get("id").is_none());
        assert!(frame.get("command").is_none());
        assert!(frame.get("value").is_none());
    }

    #[test]
    fn frame_tag_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(FrameTag::Request).expect("tag json"),
            serde_json::json!("request")
        );
        assert_eq!(
            serde_json::to_value(FrameTag::Reply).expect("tag json"),
            serde_json::json!("reply")
        );
        assert_eq!(
            serde_json::to_value(FrameTag::Error).expect("tag json"),
            serde_json::json!("error")
        );
    }
}
